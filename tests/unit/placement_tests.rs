// Placement resolver tests

use imprint::watermark::{
    resolve_position, Anchor, ImageDimensions, PlacementPosition, PlacementSpec,
    WatermarkDimensions,
};
use rstest::rstest;

fn image(width: u32, height: u32) -> ImageDimensions {
    ImageDimensions { width, height }
}

fn watermark(width: u32, height: u32) -> WatermarkDimensions {
    WatermarkDimensions { width, height }
}

#[rstest]
#[case(Anchor::TopLeft)]
#[case(Anchor::TopRight)]
#[case(Anchor::BottomLeft)]
#[case(Anchor::BottomRight)]
#[case(Anchor::Center)]
fn test_fitting_content_stays_inside(#[case] anchor: Anchor) {
    let placement = PlacementSpec::new(anchor);
    let m = placement.margin as u32;

    for (container_w, container_h) in [(200u32, 100u32), (64, 64), (1920, 1080), (21, 21)] {
        // Largest content that still fits between the margins, and a tiny one
        for (content_w, content_h) in [(container_w - 2 * m, container_h - 2 * m), (1, 1)] {
            let pos = resolve_position(
                &image(container_w, container_h),
                &watermark(content_w, content_h),
                &placement,
            );

            assert!(pos.x >= 0 && pos.y >= 0, "{:?} at {:?}", anchor, pos);
            assert!(pos.x + content_w as i32 <= container_w as i32);
            assert!(pos.y + content_h as i32 <= container_h as i32);
        }
    }
}

#[rstest]
#[case("")]
#[case("middle")]
#[case("bottom right")]
#[case("centre")]
#[case("TOP_LEFTISH")]
fn test_unrecognized_anchor_equals_bottom_right(#[case] name: &str) {
    let img = image(640, 480);
    let wm = watermark(120, 30);

    let unknown = PlacementSpec::new(Anchor::parse(name));
    let bottom_right = PlacementSpec::new(Anchor::BottomRight);

    assert_eq!(
        resolve_position(&img, &wm, &unknown),
        resolve_position(&img, &wm, &bottom_right)
    );
}

#[test]
fn test_text_box_scenario() {
    // 200x100 image, 20x16 text box, bottom right with the default margin
    let pos = resolve_position(
        &image(200, 100),
        &watermark(20, 16),
        &PlacementSpec::default(),
    );
    assert_eq!(pos, PlacementPosition::new(170, 74));
}

#[test]
fn test_center_is_resolvable() {
    let pos = resolve_position(
        &image(200, 100),
        &watermark(20, 16),
        &PlacementSpec::new(Anchor::parse("center")),
    );
    assert_eq!(pos, PlacementPosition::new(90, 42));
}

#[test]
fn test_custom_passes_through_off_canvas() {
    let pos = resolve_position(
        &image(200, 100),
        &watermark(20, 16),
        &PlacementSpec::custom(250, -30),
    );
    assert_eq!(pos, PlacementPosition::new(250, -30));
}
