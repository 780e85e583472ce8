// Settings loading tests

use imprint::config::WatermarkSettings;
use imprint::watermark::{Anchor, Color, WatermarkSpec};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_from_file_reads_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r##"
use_image_watermark: false
text: "Proof"
text_color: "#102030"
font_size_px: 32
opacity: 300
position: top_right
margin: 4
"##
    )
    .unwrap();

    let settings = WatermarkSettings::from_file(file.path()).unwrap();

    assert_eq!(settings.text, "Proof");
    assert_eq!(settings.opacity, 255);
    assert_eq!(settings.anchor(), Anchor::TopRight);

    let (spec, placement) = settings.to_spec();
    assert_eq!(placement.margin, 4);
    match spec {
        WatermarkSpec::Text(text) => {
            assert_eq!(text.color, Color::new(0x10, 0x20, 0x30));
            assert_eq!(text.font_size_px, 32);
            assert_eq!(text.opacity, 255);
        }
        other => panic!("expected text watermark, got {:?}", other),
    }
}

#[test]
fn test_bad_color_and_position_are_tolerated() {
    let settings = WatermarkSettings {
        text_color: "chartreuse".to_string(),
        position: "upper-left".to_string(),
        ..Default::default()
    };

    assert_eq!(settings.text_color(), Color::new(255, 255, 255));
    assert_eq!(settings.anchor(), Anchor::BottomRight);
}

#[test]
fn test_settings_yaml_contains_every_option() {
    let yaml = serde_yaml::to_string(&WatermarkSettings::default()).unwrap();
    for key in [
        "enabled",
        "use_image_watermark",
        "text",
        "text_color",
        "font_name",
        "font_size_px",
        "image_path",
        "max_size_px",
        "opacity",
        "position",
        "custom_x",
        "custom_y",
    ] {
        assert!(yaml.contains(&format!("{}:", key)), "missing {}", key);
    }
}
