/// Image formats the layout engine is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Raster PNG (default)
    #[default]
    Png,
    /// Scalable vector graphics
    Svg,
    /// PDF document
    Pdf,
    /// Raster JPEG
    Jpg,
}

impl ImageFormat {
    /// File extension, also the Graphviz `-T` output name
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Jpg => "jpg",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'png', 'svg', 'pdf' or 'jpg'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
