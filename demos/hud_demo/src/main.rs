use hudkit_core::prelude::*;
use hudkit_devtools::{Inspector, dump_tree};

/// Window with a title bar and a close button inside it. The window shares
/// the cursor so the button can take it over.
fn build(rt: &mut Runtime) -> (NodeId, NodeId) {
    let window = rt.add_root(
        Panel::new(Color::from_hex("#1E1E1E")).border(Color::from_hex("#555555"), 1.0),
        Layout::new(300.0, 200.0)
            .with_padding(Vec2::new(8.0, 8.0))
            .capturing()
            .sharing(),
    );

    let title = rt.tree.insert_positioned(
        Panel::new(Color::from_hex("#34AF82")),
        Layout::new(0.0, 24.0)
            .with_dim_alignment(DimAlignment::MATCH_WIDTH)
            .with_parent_alignment(ParentAlignment::TOP | ParentAlignment::INNER_V),
    );
    let close = rt.tree.insert_positioned(
        Panel::new(Color::from_hex("#ae3636")).hover(Color::WHITE),
        Layout::new(16.0, 16.0)
            .with_offset(Vec2::new(-4.0, 0.0))
            .with_parent_alignment(ParentAlignment::RIGHT | ParentAlignment::INNER_H)
            .capturing(),
    );
    rt.tree.register(window, title);
    rt.tree.register(title, close);
    (window, close)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rt = Runtime::new();
    let (window, close) = build(&mut rt);
    let mut inspector = Inspector::new();
    inspector.hud.toggle_inspector();

    // Settle layout once before the pointer shows up.
    rt.frame(PointerState::hidden());

    let close_at = rt.tree.position(close);
    let path = [
        PointerState::at(-100.0, -50.0),
        PointerState::at(0.0, 0.0),
        PointerState::at(close_at.x, close_at.y),
        PointerState::at(close_at.x, close_at.y).pressed(PointerButtons::PRIMARY),
        PointerState::at(500.0, 500.0),
    ];

    for pointer in path {
        let mut frame = rt.frame(pointer);
        inspector.frame(&rt, &mut frame.scene);

        let owner = frame
            .cursor_owner
            .and_then(|id| rt.tree.element_name(id))
            .unwrap_or("nobody");
        log::info!(
            "pointer at ({}, {}): cursor held by {owner}, {} primitives",
            pointer.position.x,
            pointer.position.y,
            frame.scene.nodes.len()
        );
        for fault in &frame.faults {
            log::warn!("{fault}");
        }
    }

    println!("{}", dump_tree(&rt.tree, window));
    Ok(())
}
