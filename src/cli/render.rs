use crate::core::file_io::FilePrefix;
use crate::fractals::{common::FractalParams, ifs_texture::render_ifs_texture};

pub fn load_fractal_params(path: &str) -> Result<FractalParams, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("Unable to read param file `{}`: {}", path, err))?;
    Ok(serde_json::from_str(&text)?)
}

pub fn render_fractal(
    params: &FractalParams,
    mut file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    match params {
        FractalParams::IfsTexture(inner_params) => {
            inner_params.validate()?;
            file_prefix.create_and_step_into_sub_directory("ifs_texture")?;
            render_ifs_texture(inner_params, &file_prefix)
        }
    }
}
