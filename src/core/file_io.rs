use std::path::{Path, PathBuf};

pub fn extract_base_name(path: &str) -> Option<&str> {
    Path::new(path).file_stem().and_then(|name| name.to_str())
}

/**
 * Builds (and creates) the directory `out/<project>[/<datetime>]`.
 */
pub fn build_output_path_with_date_time(
    project: &str,
    datetime: &Option<String>,
) -> std::io::Result<PathBuf> {
    let mut dirs = vec!["out", project];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path)?;
    Ok(directory_path)
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Some(date_time_string())
    } else {
        None
    }
}

/**
 * Store a path and prefix together, making it easy to quickly generate
 * a collection of files with the same prefix, but separate suffixes.
 */
#[derive(Debug, Clone)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn full_path_with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    pub fn create_and_step_into_sub_directory(
        &mut self,
        sub_directory: &str,
    ) -> std::io::Result<()> {
        self.directory_path = self.directory_path.join(sub_directory);
        std::fs::create_dir_all(&self.directory_path)
    }

    pub fn create_file_with_suffix(
        &self,
        suffix: &str,
    ) -> std::io::Result<std::io::BufWriter<std::fs::File>> {
        let file = std::fs::File::create(self.full_path_with_suffix(suffix))?;
        Ok(std::io::BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base_name() {
        assert_eq!(
            extract_base_name("demos/render-sierpinski-swirl/params.json"),
            Some("params")
        );
        assert_eq!(extract_base_name("tiny.json"), Some("tiny"));
        assert_eq!(extract_base_name(""), None);
    }

    #[test]
    fn test_file_prefix_suffix() {
        let prefix = FilePrefix {
            directory_path: ["out", "render"].iter().collect(),
            file_base: "scene".to_owned(),
        };
        let expected: PathBuf = ["out", "render", "scene_texture.png"].iter().collect();
        assert_eq!(prefix.full_path_with_suffix("_texture.png"), expected);
    }

    #[test]
    fn test_date_time_string_format() {
        let stamp = date_time_string();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
        assert!(maybe_date_time_string(false).is_none());
    }
}
