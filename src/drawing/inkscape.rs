//! Inkscape integration
//!
//! Creates `<figures_dir>/<fileName>.svg` from a blank canvas if it does not
//! exist yet, opens it in the editor, and once the editor exits exports the
//! `pdf` + `pdf_tex` pair that `\incfig` imports.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::{file_name, DrawingTool};
use crate::blueprint::Factors;
use crate::config::DrawingConfig;
use crate::error::DrawingError;

/// Drives an Inkscape-compatible executable
#[derive(Debug, Clone)]
pub struct Inkscape {
    config: DrawingConfig,
}

impl Inkscape {
    pub fn new(config: DrawingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    /// Path of the editable source for a figure
    pub fn svg_path(&self, name: &str) -> PathBuf {
        self.config.figures_dir.join(format!("{}.svg", name))
    }

    /// Path of the exported PDF for a figure; the `pdf_tex` sits beside it
    pub fn pdf_path(&self, name: &str) -> PathBuf {
        self.config.figures_dir.join(format!("{}.pdf", name))
    }

    fn prepare(&self, svg: &Path) -> Result<(), DrawingError> {
        let dir = &self.config.figures_dir;
        fs::create_dir_all(dir).map_err(|source| DrawingError::Io {
            path: dir.clone(),
            source,
        })?;

        if svg.exists() {
            debug!("Reusing existing figure {}", svg.display());
            return Ok(());
        }

        let canvas = blank_canvas(self.config.canvas_width, self.config.canvas_height);
        fs::write(svg, canvas).map_err(|source| DrawingError::Io {
            path: svg.to_path_buf(),
            source,
        })?;
        info!("Created blank figure {}", svg.display());
        Ok(())
    }

    fn run(&self, args: &[&std::ffi::OsStr]) -> Result<(), DrawingError> {
        let command = &self.config.command;
        debug!(command = %command, ?args, "running drawing tool");

        let status = Command::new(command)
            .args(args)
            .status()
            .map_err(|source| DrawingError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(DrawingError::ToolFailed {
                command: command.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl DrawingTool for Inkscape {
    fn name(&self) -> &str {
        "inkscape"
    }

    fn create(&self, factors: &Factors) -> Result<(), DrawingError> {
        let name = file_name(factors)?;
        let svg = self.svg_path(name);
        self.prepare(&svg)?;

        self.run(&[svg.as_os_str()])?;

        if self.config.export_latex {
            let pdf = self.pdf_path(name);
            let mut export_filename = std::ffi::OsString::from("--export-filename=");
            export_filename.push(pdf.as_os_str());
            self.run(&[
                svg.as_os_str(),
                "--export-area-page".as_ref(),
                "--export-dpi=300".as_ref(),
                "--export-type=pdf".as_ref(),
                "--export-latex".as_ref(),
                export_filename.as_os_str(),
            ])?;
            info!("Exported {} with LaTeX text layer", pdf.display());
        }
        Ok(())
    }
}

/// An empty SVG document of the given size in points
pub fn blank_canvas(width: f64, height: f64) -> String {
    let mut svg = String::new();
    svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    svg.push('\n');
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}pt" height="{h}pt" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    ));
    svg.push('\n');
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(dir: &Path, command: &str, export_latex: bool) -> Inkscape {
        Inkscape::new(DrawingConfig {
            command: command.to_string(),
            figures_dir: dir.join("figures"),
            export_latex,
            ..DrawingConfig::default()
        })
    }

    fn factors(name: &str) -> Factors {
        [("fileName".to_string(), name.to_string())].into()
    }

    #[test]
    fn test_blank_canvas() {
        let svg = blank_canvas(240.0, 120.0);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 240 120""#));
        assert!(svg.contains(r#"width="240pt""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_paths() {
        let ink = tool(Path::new("/tmp/doc"), "inkscape", true);
        assert_eq!(ink.svg_path("tree"), PathBuf::from("/tmp/doc/figures/tree.svg"));
        assert_eq!(ink.pdf_path("tree"), PathBuf::from("/tmp/doc/figures/tree.pdf"));
    }

    #[test]
    fn test_missing_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let ink = tool(dir.path(), "true", false);
        let err = ink.create(&Factors::new()).unwrap_err();
        assert!(matches!(err, DrawingError::MissingFactor("fileName")));
        assert!(!dir.path().join("figures").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_create_writes_canvas_and_runs_tool() {
        let dir = tempfile::tempdir().unwrap();
        let ink = tool(dir.path(), "true", true);
        ink.create(&factors("tree")).unwrap();

        let svg = fs::read_to_string(dir.path().join("figures/tree.svg")).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_figure_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let figures = dir.path().join("figures");
        fs::create_dir_all(&figures).unwrap();
        fs::write(figures.join("tree.svg"), "<svg>drawn</svg>").unwrap();

        tool(dir.path(), "true", false).create(&factors("tree")).unwrap();
        let svg = fs::read_to_string(figures.join("tree.svg")).unwrap();
        assert_eq!(svg, "<svg>drawn</svg>");
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = tool(dir.path(), "false", false)
            .create(&factors("tree"))
            .unwrap_err();
        assert!(matches!(err, DrawingError::ToolFailed { .. }));
    }

    #[test]
    fn test_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = tool(dir.path(), "definitely-not-a-drawing-tool", false)
            .create(&factors("tree"))
            .unwrap_err();
        assert!(matches!(err, DrawingError::Spawn { .. }));
    }
}
