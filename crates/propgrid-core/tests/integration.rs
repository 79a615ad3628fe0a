//! Integration tests for propgrid-core.
//!
//! These drive the public `PropertyGrid` API end to end: binding an object,
//! reading its editors, committing edits and checking the object.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use propgrid_core::{
    BindingError, DisplayInfo, EditorKind, EnumProperty, EnumerationError, GridOptions, Inspect,
    MetadataTable, PictureBox, PropertyGrid, SizeMode, Surface,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn shown(grid: &PropertyGrid, name: &str) -> String {
    grid.editor(name)
        .and_then(|editor| editor.display())
        .unwrap_or_default()
        .to_string()
}

fn row_names(grid: &PropertyGrid) -> Vec<String> {
    grid.rows()
        .iter()
        .map(|row| row.descriptor.name.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Point {
    x: i32,
    y: i32,
}

impl Inspect for Point {
    fn surface(&self) -> Result<Surface, EnumerationError> {
        Ok(Surface::builder::<Point>()
            .getter("getX", |p| p.x)
            .setter("setX", |p, v| p.x = v)
            .getter("getY", |p| p.y)
            .setter("setY", |p, v| p.y = v)
            .method("toString")
            .build())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Color {
    #[default]
    Red,
    Green,
    Blue,
}

impl EnumProperty for Color {
    const TYPE_NAME: &'static str = "Color";

    fn variants() -> &'static [Self] {
        &[Color::Red, Color::Green, Color::Blue]
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
        }
    }
}

#[derive(Debug, Default)]
struct Pen {
    color: Color,
    width: f32,
    visible: bool,
    id: i32,
}

impl Inspect for Pen {
    fn surface(&self) -> Result<Surface, EnumerationError> {
        Ok(Surface::builder::<Pen>()
            .getter("getId", |p| p.id)
            .getter("getColor", |p| p.color)
            .setter("setColor", |p, v| p.color = v)
            .getter("getWidth", |p| p.width)
            .setter("setWidth", |p, v| p.width = v)
            .getter("isVisible", |p| p.visible)
            .setter("setIsVisible", |p, v| p.visible = v)
            .build())
    }
}

/// Exposes the same property as an accessor pair and as a public field.
#[derive(Debug, Default)]
struct Sprite {
    name: String,
    hidden: bool,
    layer: i32,
}

impl Inspect for Sprite {
    fn surface(&self) -> Result<Surface, EnumerationError> {
        Ok(Surface::builder::<Sprite>()
            .getter("getName", |s| s.name.clone())
            .setter("setName", |s, v| s.name = v)
            .field("Name", |s| format!("field:{}", s.name), |s, v| s.name = v)
            .field("isHidden", |s| s.hidden, |s, v| s.hidden = v)
            .readonly_field("layer", |s| s.layer)
            .build())
    }
}

// ---------------------------------------------------------------------------
// Accessor binding
// ---------------------------------------------------------------------------

#[test]
fn test_point_rows_are_prefilled() {
    init_logging();
    let point = Rc::new(RefCell::new(Point { x: 3, y: 4 }));
    let mut grid = PropertyGrid::new();
    grid.bind(point.clone());

    assert_eq!(row_names(&grid), ["X", "Y"]);
    assert_eq!(shown(&grid, "X"), "3");
    assert_eq!(shown(&grid, "Y"), "4");
    assert_eq!(grid.editor("X").unwrap().kind(), EditorKind::Text);
}

#[test]
fn test_point_edit_writes_through() {
    init_logging();
    let point = Rc::new(RefCell::new(Point { x: 3, y: 4 }));
    let mut grid = PropertyGrid::new();
    grid.bind(point.clone());

    grid.on_user_edit("X", "10");
    assert_eq!(point.borrow().x, 10);
    assert_eq!(point.borrow().y, 4);
    assert_eq!(shown(&grid, "X"), "10");
}

#[test]
fn test_integer_rejects_text() {
    init_logging();
    let point = Rc::new(RefCell::new(Point { x: 3, y: 4 }));
    let mut grid = PropertyGrid::new();
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    grid.set_diagnostics(move |err| sink.borrow_mut().push(err.clone()));
    grid.bind(point.clone());

    grid.on_user_edit("X", "abc");
    assert_eq!(point.borrow().x, 3);
    assert!(grid.editor("X").unwrap().is_invalid());
    assert!(matches!(errors.borrow()[0], BindingError::Parse(_)));

    grid.on_user_edit("X", "5");
    assert!(!grid.editor("X").unwrap().is_invalid());
    assert_eq!(point.borrow().x, 5);
}

#[test]
fn test_color_choices_follow_declaration_order() {
    init_logging();
    let pen = Rc::new(RefCell::new(Pen::default()));
    let mut grid = PropertyGrid::new();
    grid.bind(pen.clone());

    let color = grid.editor("Color").unwrap();
    assert_eq!(color.kind(), EditorKind::EnumChoice);
    assert_eq!(color.choices(), ["RED", "GREEN", "BLUE"]);
    assert_eq!(color.display(), Some("RED"));

    grid.select_choice("Color", 2);
    assert_eq!(pen.borrow().color, Color::Blue);
    assert_eq!(shown(&grid, "Color"), "BLUE");
}

#[test]
fn test_boolean_choices() {
    init_logging();
    let pen = Rc::new(RefCell::new(Pen::default()));
    let mut grid = PropertyGrid::new();
    grid.bind(pen.clone());

    let visible = grid.editor("Visible").unwrap();
    assert_eq!(visible.choices(), ["true", "false"]);
    assert_eq!(visible.display(), Some("false"));
    assert!(grid.descriptor("Visible").unwrap().is_boolean_like);
    assert_eq!(grid.descriptor("Visible").unwrap().display_name, "isVisible");

    grid.on_user_edit("Visible", "true");
    assert!(pen.borrow().visible);
}

#[test]
fn test_float_round_trip() {
    init_logging();
    let pen = Rc::new(RefCell::new(Pen {
        width: 1.5,
        ..Default::default()
    }));
    let mut grid = PropertyGrid::new();
    grid.bind(pen.clone());
    assert_eq!(shown(&grid, "Width"), "1.5");

    grid.on_user_edit("Width", " 2.25 ");
    assert_eq!(pen.borrow().width, 2.25);
    assert_eq!(shown(&grid, "Width"), "2.25");
}

#[test]
fn test_getter_only_row_is_read_only() {
    init_logging();
    let pen = Rc::new(RefCell::new(Pen {
        id: 7,
        ..Default::default()
    }));
    let mut grid = PropertyGrid::new();
    grid.bind(pen.clone());

    assert!(!grid.editor("Id").unwrap().is_interactive());
    grid.on_user_edit("Id", "8");
    assert_eq!(pen.borrow().id, 7);
    assert_eq!(shown(&grid, "Id"), "7");
}

#[test]
fn test_refresh_twice_matches() {
    init_logging();
    let pen = Rc::new(RefCell::new(Pen::default()));
    let mut grid = PropertyGrid::new();
    grid.bind(pen);

    grid.refresh();
    let first: Vec<_> = grid.rows().iter().map(|r| r.editor.clone()).collect();
    grid.refresh();
    let second: Vec<_> = grid.rows().iter().map(|r| r.editor.clone()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_rebind_replaces_rows() {
    init_logging();
    let mut grid = PropertyGrid::new();
    grid.bind(Rc::new(RefCell::new(Pen::default())));
    assert_eq!(grid.property_count(), 4);

    grid.bind(Rc::new(RefCell::new(Point::default())));
    assert_eq!(row_names(&grid), ["X", "Y"]);
    assert!(grid.editor("Color").is_none());
}

// ---------------------------------------------------------------------------
// Fields, metadata, options
// ---------------------------------------------------------------------------

#[test]
fn test_accessors_win_over_fields() {
    init_logging();
    let sprite = Rc::new(RefCell::new(Sprite {
        name: "hero".into(),
        ..Default::default()
    }));
    let mut grid = PropertyGrid::new();
    grid.set_load_fields(true);
    grid.bind(sprite.clone());

    assert_eq!(row_names(&grid), ["Name", "Hidden", "layer"]);
    assert_eq!(shown(&grid, "Name"), "hero");
    assert!(!grid.editor("layer").unwrap().is_interactive());

    grid.on_user_edit("Hidden", "true");
    assert!(sprite.borrow().hidden);
}

#[test]
fn test_fields_only() {
    init_logging();
    let sprite = Rc::new(RefCell::new(Sprite {
        name: "hero".into(),
        ..Default::default()
    }));
    let options = GridOptions {
        load_accessors: false,
        load_fields: true,
        ..Default::default()
    };
    let mut grid = PropertyGrid::with_options(options);
    grid.bind(sprite);

    assert_eq!(shown(&grid, "Name"), "field:hero");
}

#[test]
fn test_metadata_required() {
    init_logging();
    let metadata = MetadataTable::new()
        .with("Width", DisplayInfo::new("Stroke width").with_category("Stroke"));
    let mut grid = PropertyGrid::new().with_metadata(metadata);
    grid.set_require_metadata(true);
    grid.bind(Rc::new(RefCell::new(Pen::default())));

    assert_eq!(row_names(&grid), ["Width"]);
    let width = grid.descriptor("Width").unwrap();
    assert_eq!(width.display_name, "Stroke width");
    assert_eq!(width.category, "Stroke");
    assert!(grid.editor("Width").unwrap().is_interactive());
}

#[test]
fn test_header_row_is_counted() {
    init_logging();
    let mut grid = PropertyGrid::new();
    grid.set_column_titles(Some("Property"), Some("Value"));
    grid.bind(Rc::new(RefCell::new(Point::default())));

    assert_eq!(grid.property_count(), 3);
    assert_eq!(grid.header().unwrap().first, "Property");
}

// ---------------------------------------------------------------------------
// Picture box in a grid
// ---------------------------------------------------------------------------

#[test]
fn test_picture_box_is_editable() {
    init_logging();
    let mut picture = PictureBox::new(Size::new(100.0, 50.0));
    picture.set_image(Some(Size::new(30.0, 20.0)));
    let picture = Rc::new(RefCell::new(picture));

    let mut grid = PropertyGrid::new();
    grid.bind(picture.clone());

    assert_eq!(row_names(&grid), ["SizeMode"]);
    assert_eq!(shown(&grid, "SizeMode"), "NORMAL");

    grid.on_user_edit("SizeMode", "AUTOSIZE");
    let picture = picture.borrow();
    assert_eq!(picture.size_mode(), SizeMode::AutoSize);
    assert_eq!(picture.size(), Size::new(30.0, 20.0));
}
