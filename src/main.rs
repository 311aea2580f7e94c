use clap::Parser;
use ifs_texture_renderer::cli::args::{CommandsEnum, IfsTextureRendererArgs};
use ifs_texture_renderer::cli::render::{load_fractal_params, render_fractal};
use ifs_texture_renderer::core::file_io::{
    build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: IfsTextureRendererArgs = IfsTextureRendererArgs::parse();

    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let fractal_params = load_fractal_params(&params.params_path)?;
            let file_prefix = FilePrefix {
                directory_path: build_output_path_with_date_time(
                    "render",
                    &maybe_date_time_string(params.date_time_out),
                )?,
                file_base: extract_base_name(&params.params_path)
                    .ok_or("Unable to extract base name from the parameter path")?
                    .to_owned(),
            };

            render_fractal(&fractal_params, file_prefix)
        }
        None => {
            println!("Default command (nothing specified!)");
            Ok(())
        }
    }
}
