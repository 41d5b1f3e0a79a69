use clap::ValueEnum;

/// Serialization format for `kiln resolve`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON, the shape build engines consume
    #[default]
    #[value(name = "json")]
    Json,

    /// TOML, handy for diffing against kiln.toml
    #[value(name = "toml")]
    Toml,
}
