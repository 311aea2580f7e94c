use std::path::PathBuf;

use ifs_texture_renderer::{
    cli::render::{load_fractal_params, render_fractal},
    core::file_io::FilePrefix,
};

pub fn build_output_path(project: &str) -> std::io::Result<PathBuf> {
    let directory_path: PathBuf = ["out", project].iter().collect();
    std::fs::create_dir_all(&directory_path)?;
    Ok(directory_path)
}

pub fn render_demo_from_string(demo_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params_name = format!("demos/{}/params.json", demo_name);
    let fractal_params = load_fractal_params(&params_name)?;

    render_fractal(
        &fractal_params,
        FilePrefix {
            directory_path: build_output_path(demo_name)?,
            file_base: String::from("result"),
        },
    )
}
