use core::fmt;

use comfy_table::{presets::UTF8_HORIZONTAL_ONLY, Attribute, Cell, ContentArrangement, Table};

use crate::gallery::Control;

const TABLE_WIDTH: u16 = 120;

/// Display surface a gallery controller draws on.
pub trait Renderer {
    /// Replaces everything rendered for the gallery with `urls`.
    fn render(&mut self, folder: &str, urls: &[String]);

    fn set_control(&mut self, control: Control);

    /// Brings the gallery's section back into view after collapsing.
    fn scroll_into_view(&mut self) {}
}

/// Renders a gallery as a terminal table.
#[derive(Default)]
pub struct TableRenderer {
    table: Option<Table>,
    control: Option<Control>,
}

impl Renderer for TableRenderer {
    fn render(&mut self, folder: &str, urls: &[String]) {
        if urls.is_empty() {
            self.table = None;
            return;
        }
        let mut table = Table::new();
        table
            .load_preset(UTF8_HORIZONTAL_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(TABLE_WIDTH)
            .set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new(folder).add_attribute(Attribute::Bold),
            ]);
        for (i, url) in urls.iter().enumerate() {
            table.add_row(vec![Cell::new(i + 1), Cell::new(url)]);
        }
        self.table = Some(table);
    }

    fn set_control(&mut self, control: Control) {
        self.control = Some(control);
    }
}

impl fmt::Display for TableRenderer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.table {
            Some(table) => writeln!(f, "{table}")?,
            None => writeln!(f, "no images")?,
        }
        if let Some(label) = self.control.and_then(Control::label) {
            write!(f, "[{label}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_rows_and_control() {
        // Arrange
        let mut renderer = TableRenderer::default();
        let urls = vec![
            String::from("https://res/bath1.jpg"),
            String::from("https://res/bath2.jpg"),
        ];

        // Act
        renderer.render("projects/bath", &urls);
        renderer.set_control(Control::ShowMore);
        let printed = renderer.to_string();

        // Assert
        assert!(printed.contains("projects/bath"));
        assert!(printed.contains("https://res/bath2.jpg"));
        assert!(printed.ends_with("[Show More]"));
    }

    #[test]
    fn empty_render_clears_and_hidden_control_prints_nothing() {
        // Arrange
        let mut renderer = TableRenderer::default();
        renderer.render("projects/bath", &[String::from("https://res/bath1.jpg")]);

        // Act
        renderer.render("projects/bath", &[]);
        renderer.set_control(Control::Hidden);
        let printed = renderer.to_string();

        // Assert
        assert_eq!(printed, "no images\n");
    }
}
