use std::fmt::Write as _;

use web_time::Instant;

use hudkit_core::{Color, HudTree, NodeId, Runtime, Scene, SceneNode};

pub struct Hud {
    pub inspector_enabled: bool,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
            metrics: None,
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Outlines whichever element owns the cursor and refreshes the frame
    /// statistics.
    pub fn overlay(&mut self, runtime: &Runtime, scene: &mut Scene) {
        self.frame_count += 1;
        let now = Instant::now();
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = (now - prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }

        self.metrics = Some(Metrics {
            tree_nodes: runtime.tree.len(),
            scene_nodes: scene.nodes.len(),
            cursor_owner: runtime.cursor.arbiter.owner(),
        });

        if let Some(owner) = runtime.cursor.arbiter.owner()
            && let Some(rect) = runtime.tree.bounds(owner)
        {
            scene.push(SceneNode::Border {
                source: None,
                rect,
                color: Color::from_hex("#44AAFF"),
                width: 2.0,
            });
        }

        log::debug!("{}", self.status_line(&runtime.tree));
    }

    pub fn status_line(&self, tree: &HudTree) -> String {
        let mut parts = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(m) = &self.metrics {
            parts.push(format!("nodes: {}", m.tree_nodes));
            parts.push(format!("primitives: {}", m.scene_nodes));
            let owner = m
                .cursor_owner
                .and_then(|id| tree.element_name(id))
                .unwrap_or("-");
            parts.push(format!("cursor: {owner}"));
        }
        parts.join("  |  ")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub tree_nodes: usize,
    pub scene_nodes: usize,
    pub cursor_owner: Option<NodeId>,
}

pub struct Inspector {
    pub hud: Hud,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    pub fn frame(&mut self, runtime: &Runtime, scene: &mut Scene) {
        if self.hud.inspector_enabled {
            self.hud.overlay(runtime, scene);
        }
    }
}

/// Renders `root`'s subtree as indented text, one node per line:
/// element name, `[hidden]` for invisible nodes, then size and centre for
/// positioned nodes and `*` for the moused-over element.
pub fn dump_tree(tree: &HudTree, root: NodeId) -> String {
    let mut out = String::new();
    dump_node(tree, root, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

fn dump_node(tree: &HudTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(name) = tree.element_name(id) else {
        return;
    };
    let _ = write!(out, "{:indent$}{name}", "", indent = depth * 2);
    if !tree.is_visible(id) {
        out.push_str(" [hidden]");
    }
    if let Some(layout) = tree.layout(id) {
        let pos = tree.position(id);
        let _ = write!(
            out,
            " {}x{} @ ({}, {})",
            tidy(layout.width()),
            tidy(layout.height()),
            tidy(pos.x),
            tidy(pos.y)
        );
        if layout.is_moused_over() {
            out.push_str(" *");
        }
    }
    out.push('\n');

    for &child in tree.children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}

// folds -0.0 into 0.0
fn tidy(v: f32) -> f32 {
    v + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use hudkit_core::{Group, Layout, Panel, ParentAlignment, PointerState};

    #[test]
    fn dump_shows_layout_after_pre_draw() {
        let mut rt = Runtime::new();
        let root = rt.add_root(Group, Layout::new(200.0, 100.0));
        let close = rt.tree.insert_positioned(
            Panel::new(Color::WHITE),
            Layout::new(20.0, 20.0).capturing().with_parent_alignment(
                ParentAlignment::TOP | ParentAlignment::RIGHT | ParentAlignment::INNER,
            ),
        );
        let tip = rt.tree.insert_positioned(
            Panel::new(Color::BLACK),
            Layout::new(30.0, 10.0).with_parent_alignment(ParentAlignment::BOTTOM),
        );
        rt.tree.register_children(root, [close, tip]);
        rt.tree.set_visible(tip, false);

        rt.frame(PointerState::hidden());
        rt.frame(PointerState::at(92.0, 38.0));

        insta::assert_snapshot!(dump_tree(&rt.tree, root), @r"
        Group 200x100 @ (0, 0)
          Panel 20x20 @ (90, 40) *
          Panel [hidden] 30x10 @ (0, 0)
        ");
    }

    #[test]
    fn overlay_outlines_the_cursor_owner() {
        let mut rt = Runtime::new();
        let root = rt.add_root(Panel::new(Color::BLACK), Layout::new(40.0, 40.0).capturing());
        let mut frame = rt.frame(PointerState::at(1.0, 1.0));

        let mut inspector = Inspector::new();
        inspector.frame(&rt, &mut frame.scene);
        assert_eq!(frame.scene.nodes.len(), 1);

        inspector.hud.toggle_inspector();
        inspector.frame(&rt, &mut frame.scene);
        assert_eq!(inspector.hud.frame_count(), 1);
        let outline = frame.scene.nodes.last().unwrap();
        assert!(matches!(outline, SceneNode::Border { .. }));
        assert_eq!(outline.rect(), rt.tree.bounds(root).unwrap());

        let status = inspector.hud.status_line(&rt.tree);
        assert!(status.contains("cursor: Panel"));
        assert!(status.contains("nodes: 1"));
    }
}
