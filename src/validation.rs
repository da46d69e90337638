//! Image validation rules.
//!
//! Rules produce structured violations; the validator folds every rule's
//! output into one result per file. Structural problems are data, not
//! errors - only an I/O failure reading the file escapes as an error.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::enumerate::{ImageFile, ImageFormat};
use crate::pipeline::PipelineError;

/// One reported reason a file fails validation.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub rule: &'static str,
    pub message: String,
}

/// Outcome of validating a single file. Empty violations = valid.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub path: PathBuf,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validation rule trait - produces violations for one file's bytes.
pub trait FormatRule {
    fn name(&self) -> &'static str;
    fn applies_to(&self, format: ImageFormat) -> bool;
    fn check(&self, file: &ImageFile, bytes: &[u8]) -> Vec<Violation>;
}

// --- Concrete Rules ---

/// SVG assets must stay scalable: dimensions come from `viewBox` only, so the
/// root element must not declare `width` or `height`.
pub struct SvgScalabilityRule;

impl SvgScalabilityRule {
    fn malformed(&self, message: String) -> Vec<Violation> {
        vec![Violation {
            rule: self.name(),
            message,
        }]
    }
}

impl FormatRule for SvgScalabilityRule {
    fn name(&self) -> &'static str {
        "svg_scalability"
    }

    fn applies_to(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Svg
    }

    fn check(&self, _file: &ImageFile, bytes: &[u8]) -> Vec<Violation> {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => return self.malformed("File is not valid UTF-8 SVG".to_string()),
        };
        let document = match roxmltree::Document::parse(text) {
            Ok(document) => document,
            Err(error) => {
                return self.malformed(format!("File could not be parsed as SVG: {error}"))
            }
        };

        let root = document.root_element();
        if root.tag_name().name() != "svg" {
            return self.malformed(format!(
                "Root element is <{}>, expected <svg>",
                root.tag_name().name()
            ));
        }

        let mut violations = vec![];
        for attribute in ["width", "height"] {
            if root.attribute(attribute).is_some() {
                violations.push(Violation {
                    rule: self.name(),
                    message: format!(
                        "Root svg element must not have a `{attribute}` attribute"
                    ),
                });
            }
        }
        violations
    }
}

/// Raster files must carry the magic bytes of the format their extension
/// claims.
pub struct RasterSignatureRule;

impl FormatRule for RasterSignatureRule {
    fn name(&self) -> &'static str {
        "raster_signature"
    }

    fn applies_to(&self, format: ImageFormat) -> bool {
        format != ImageFormat::Svg
    }

    fn check(&self, file: &ImageFile, bytes: &[u8]) -> Vec<Violation> {
        let expected = match file.format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Svg => return vec![],
        };

        match image::guess_format(bytes) {
            Ok(actual) if actual == expected => vec![],
            _ => vec![Violation {
                rule: self.name(),
                message: format!("File does not contain a valid {} image", file.format.name()),
            }],
        }
    }
}

/// Validator owns the rule set and runs every applicable rule over a file.
pub struct Validator {
    rules: Vec<Box<dyn FormatRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(SvgScalabilityRule), Box::new(RasterSignatureRule)],
        }
    }

    /// Validate one file. All applicable rules run; their violations are
    /// collected into a single result keyed by the file's relative path.
    pub fn validate(&self, file: &ImageFile) -> Result<ValidationResult, PipelineError> {
        let bytes = fs::read(&file.path).map_err(|source| PipelineError::Io {
            path: file.path.clone(),
            source,
        })?;

        let mut violations = vec![];
        for rule in &self.rules {
            if rule.applies_to(file.format) {
                violations.extend(rule.check(file, &bytes));
            }
        }

        Ok(ValidationResult {
            path: file.relative_path.clone(),
            violations,
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Minimal 1x1 transparent PNG.
    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn image_file(name: &str, format: ImageFormat) -> ImageFile {
        ImageFile {
            path: PathBuf::from(name),
            relative_path: PathBuf::from(name),
            format,
        }
    }

    #[test]
    fn svg_without_dimensions_is_valid() {
        let rule = SvgScalabilityRule;
        let file = image_file("valid.svg", ImageFormat::Svg);
        let violations = rule.check(&file, br#"<svg viewBox="0 0 10 10"></svg>"#);
        assert!(violations.is_empty());
    }

    #[test]
    fn bare_svg_element_is_valid() {
        let rule = SvgScalabilityRule;
        let file = image_file("valid.svg", ImageFormat::Svg);
        assert!(rule.check(&file, b"<svg></svg>").is_empty());
    }

    #[test]
    fn svg_dimension_attributes_each_produce_a_violation() {
        let rule = SvgScalabilityRule;
        let file = image_file("fixed.svg", ImageFormat::Svg);
        let violations = rule.check(&file, br#"<svg width="100" height="100"></svg>"#);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("`width` attribute"));
        assert!(violations[1].message.contains("`height` attribute"));
    }

    #[test]
    fn svg_with_only_width_produces_one_violation() {
        let rule = SvgScalabilityRule;
        let file = image_file("wide.svg", ImageFormat::Svg);
        let violations = rule.check(&file, br#"<svg width="100"></svg>"#);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("`width` attribute"));
    }

    #[test]
    fn unparseable_svg_is_malformed() {
        let rule = SvgScalabilityRule;
        let file = image_file("broken.svg", ImageFormat::Svg);
        let violations = rule.check(&file, b"<svg");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("could not be parsed"));
    }

    #[test]
    fn non_svg_root_is_malformed() {
        let rule = SvgScalabilityRule;
        let file = image_file("odd.svg", ImageFormat::Svg);
        let violations = rule.check(&file, b"<html></html>");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("expected <svg>"));
    }

    #[test]
    fn real_png_passes_signature_check() {
        let rule = RasterSignatureRule;
        let file = image_file("dot.png", ImageFormat::Png);
        assert!(rule.check(&file, PNG_1X1).is_empty());
    }

    #[test]
    fn fake_png_fails_signature_check() {
        let rule = RasterSignatureRule;
        let file = image_file("example.png", ImageFormat::Png);
        let violations = rule.check(&file, b"not-really-a-png");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("valid PNG image"));
    }

    #[test]
    fn png_bytes_under_gif_extension_fail() {
        let rule = RasterSignatureRule;
        let file = image_file("mislabelled.gif", ImageFormat::Gif);
        let violations = rule.check(&file, PNG_1X1);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("valid GIF image"));
    }

    #[test]
    fn validator_reads_file_and_aggregates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixed.svg");
        fs::write(&path, r#"<svg width="1" height="1"></svg>"#).unwrap();

        let file = ImageFile {
            path,
            relative_path: PathBuf::from("fixed.svg"),
            format: ImageFormat::Svg,
        };
        let result = Validator::new().validate(&file).unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.path, PathBuf::from("fixed.svg"));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let file = ImageFile {
            path: PathBuf::from("does-not-exist.png"),
            relative_path: PathBuf::from("does-not-exist.png"),
            format: ImageFormat::Png,
        };
        let result = Validator::new().validate(&file);
        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }
}
