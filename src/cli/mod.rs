pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod validate;

use clap::{Parser, Subcommand};

/// ikon - Icon texture generator
#[derive(Parser, Debug)]
#[command(name = "ikon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build icon textures from definition files
    Build(build::BuildArgs),

    /// Initialize an ikon project (generates ikon.yaml)
    Init(init::InitArgs),

    /// List discovered project assets
    List(list::ListArgs),

    /// Validate definition files without rendering
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
