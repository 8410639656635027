//! Output format types

use std::fmt;

/// The three artifacts written for every accepted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// 32-bit float OpenEXR, unclamped linear
    Exr,
    /// 16-bit PNG, linear clamped to [0, 1]
    Png16,
    /// 8-bit PNG, clamped and gamma encoded
    Png8,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Exr, OutputFormat::Png16, OutputFormat::Png8];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Exr => "exr",
            OutputFormat::Png16 | OutputFormat::Png8 => "png",
        }
    }

    /// Directory name below `<base>/tmp/`.
    pub fn directory_name(self) -> &'static str {
        match self {
            OutputFormat::Exr => "images-32bit",
            OutputFormat::Png16 => "images-16bit",
            OutputFormat::Png8 => "images",
        }
    }

    /// `000042.exr` style file name for a dense frame index.
    pub fn file_name(self, index: u64) -> String {
        format!("{:06}.{}", index, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Exr => "EXR (32-bit float)",
            OutputFormat::Png16 => "PNG (16-bit)",
            OutputFormat::Png8 => "PNG (8-bit)",
        };
        f.write_str(name)
    }
}

/// Channel order a writer expects its interleaved buffers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// PNG compression effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PngCompression {
    /// Fastest encode, largest files (default)
    #[default]
    Fast,
    /// Encoder default
    Default,
    /// Smallest files, slowest encode
    Best,
}
