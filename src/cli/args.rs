use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct IfsTextureRendererArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render the fractal described by a JSON parameter file.
    Render(ParameterFilePath),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: String,

    /// Write the outputs into a date-time stamped sub-directory.
    #[clap(long, short)]
    pub date_time_out: bool,
}
