use std::fmt;

use roxmltree::Node;
use serde::Serialize;

use crate::attr;
use crate::error::Result;
use crate::vocab::GraphicsType;

const TAG: &str = "graphics";

/// Drawing hints attached to an entry. Every attribute is optional, so an
/// empty `<graphics/>` is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Graphics {
    name: Option<String>,
    fgcolor: Option<String>,
    bgcolor: Option<String>,
    #[serde(rename = "type")]
    graphics_type: Option<GraphicsType>,
    x: Option<i64>,
    y: Option<i64>,
    width: Option<i64>,
    height: Option<i64>,
    coords: Option<String>,
}

impl Graphics {
    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, TAG)?;

        let mut graphics = Graphics {
            name: attr::optional(node, "name").map(str::to_string),
            graphics_type: attr::optional(node, "type")
                .map(str::parse::<GraphicsType>)
                .transpose()?,
            x: attr::parse_optional_integer(node, TAG, "x")?,
            y: attr::parse_optional_integer(node, TAG, "y")?,
            width: attr::parse_optional_integer(node, TAG, "width")?,
            height: attr::parse_optional_integer(node, TAG, "height")?,
            coords: attr::optional(node, "coords").map(str::to_string),
            ..Graphics::default()
        };
        if let Some(color) = attr::optional(node, "fgcolor") {
            graphics = graphics.with_fgcolor(color)?;
        }
        if let Some(color) = attr::optional(node, "bgcolor") {
            graphics = graphics.with_bgcolor(color)?;
        }
        Ok(graphics)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the foreground color; accepts `#RRGGBB` or `none`.
    pub fn with_fgcolor(mut self, color: &str) -> Result<Self> {
        attr::check_hex_color(TAG, "fgcolor", color)?;
        self.fgcolor = Some(color.to_string());
        Ok(self)
    }

    /// Set the background color; accepts `#RRGGBB` or `none`.
    pub fn with_bgcolor(mut self, color: &str) -> Result<Self> {
        attr::check_hex_color(TAG, "bgcolor", color)?;
        self.bgcolor = Some(color.to_string());
        Ok(self)
    }

    pub fn with_type(mut self, graphics_type: GraphicsType) -> Self {
        self.graphics_type = Some(graphics_type);
        self
    }

    pub fn with_position(mut self, x: i64, y: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_coords(mut self, coords: impl Into<String>) -> Self {
        self.coords = Some(coords.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fgcolor(&self) -> Option<&str> {
        self.fgcolor.as_deref()
    }

    pub fn bgcolor(&self) -> Option<&str> {
        self.bgcolor.as_deref()
    }

    pub fn graphics_type(&self) -> Option<GraphicsType> {
        self.graphics_type
    }

    pub fn x(&self) -> Option<i64> {
        self.x
    }

    pub fn y(&self) -> Option<i64> {
        self.y
    }

    pub fn width(&self) -> Option<i64> {
        self.width
    }

    pub fn height(&self) -> Option<i64> {
        self.height
    }

    /// Comma-separated polyline for `line` graphics, kept as written.
    pub fn coords(&self) -> Option<&str> {
        self.coords.as_deref()
    }
}

impl fmt::Display for Graphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Graphics name='{}'>", self.name.as_deref().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn parse(xml: &str) -> Result<Graphics> {
        let doc = Document::parse(xml).unwrap();
        Graphics::parse(&doc.root_element())
    }

    #[test]
    fn parses_full_element() {
        let graphics = parse(
            r##"<graphics name="Pgm1, 3230402E02Rik, Pgm-1, Pgm2" fgcolor="#000000" bgcolor="#BFFFBF" type="rectangle"
                x="628" y="541" width="46" height="17"/>"##,
        )
        .unwrap();
        assert_eq!(graphics.graphics_type(), Some(GraphicsType::Rectangle));
        assert_eq!(graphics.name(), Some("Pgm1, 3230402E02Rik, Pgm-1, Pgm2"));
        assert_eq!(graphics.fgcolor(), Some("#000000"));
        assert_eq!(graphics.bgcolor(), Some("#BFFFBF"));
        assert_eq!(graphics.x(), Some(628));
        assert_eq!(graphics.height(), Some(17));
        assert_eq!(graphics.coords(), None);
        assert!(graphics.to_string().contains("Pgm1"));
    }

    #[test]
    fn empty_element_is_valid() {
        let graphics = parse("<graphics />").unwrap();
        assert_eq!(graphics, Graphics::default());
        assert_eq!(graphics.name(), None);
    }

    #[test]
    fn line_keeps_coords() {
        let graphics = parse(r#"<graphics type="line" coords="100,200,150,200" fgcolor="none"/>"#).unwrap();
        assert_eq!(graphics.graphics_type(), Some(GraphicsType::Line));
        assert_eq!(graphics.coords(), Some("100,200,150,200"));
        assert_eq!(graphics.fgcolor(), Some("none"));
    }

    #[test]
    fn rejects_invalid_attributes() {
        for xml in [
            r#"<graphics type="invalid" />"#,
            r#"<graphics bgcolor="invalid" />"#,
            r#"<graphics fgcolor="invalid" />"#,
            r#"<graphics x="string" />"#,
            r#"<graphics y="string" />"#,
            r#"<graphics width="string" />"#,
            r#"<graphics height="string" />"#,
            r#"<graphics width="+3" />"#,
        ] {
            let err = parse(xml).unwrap_err();
            assert!(err.is_validation(), "{xml}");
        }
    }

    #[test]
    fn builder_applies_same_color_rule() {
        assert!(Graphics::default().with_fgcolor("#BFFFBF").is_ok());
        assert!(Graphics::default().with_bgcolor("none").is_ok());
        assert!(Graphics::default().with_bgcolor("invalid").unwrap_err().is_validation());
    }

    #[test]
    fn rejects_other_tags() {
        let err = parse("<entry/>").unwrap_err();
        assert!(err.is_contract_violation());
    }
}
