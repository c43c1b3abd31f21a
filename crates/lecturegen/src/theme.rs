use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Background of overlays (help, notes, raw markdown).
    pub panel_background: Color32,
    pub panel_foreground: Color32,
    pub h1_size: f32,
    pub label_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1C, 0x19, 0x17),
            foreground: Color32::from_rgb(0xD6, 0xD3, 0xD1),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0xFB, 0x92, 0x3C),
            panel_background: Color32::from_rgb(0x29, 0x25, 0x24),
            panel_foreground: Color32::from_rgb(0xE7, 0xE5, 0xE4),
            h1_size: 80.0,
            label_size: 30.0,
            h3_size: 48.0,
            body_size: 40.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xFA, 0xFA, 0xF9),
            foreground: Color32::from_rgb(0x57, 0x53, 0x4E),
            heading_color: Color32::from_rgb(0x1C, 0x19, 0x17),
            accent: Color32::from_rgb(0xEA, 0x58, 0x0C),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF4),
            panel_foreground: Color32::from_rgb(0x29, 0x25, 0x24),
            h1_size: 80.0,
            label_size: 30.0,
            h3_size: 48.0,
            body_size: 40.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_defaults_to_light() {
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("sepia").name, "light");
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::light().toggled().name, "dark");
        assert_eq!(Theme::dark().toggled().name, "light");
    }

    #[test]
    fn test_with_opacity() {
        let c = Theme::with_opacity(Color32::from_rgb(10, 20, 30), 0.0);
        assert_eq!(c.a(), 0);
    }
}
