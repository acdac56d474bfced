use crate::{
    Color, Cursor, Element, HudError, HudTree, Layout, NodeId, PointerState, Result, Scene,
};

#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Smallest hit box extent per axis.
    pub min_hit_extent: f32,
    pub clear_color: Color,
    /// Log hook faults at error level. Faults are returned in [`Frame`] either way.
    pub log_faults: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            min_hit_extent: crate::tree::MIN_HIT_EXTENT,
            clear_color: Color::TRANSPARENT,
            log_faults: true,
        }
    }
}

/// Frame — output of one input/pre-draw/draw cycle over every root.
#[derive(Debug, Default)]
pub struct Frame {
    pub scene: Scene,
    /// Element holding the cursor after the input pass.
    pub cursor_owner: Option<NodeId>,
    /// Hook faults caught this frame, one per panicking hook call.
    pub faults: Vec<HudError>,
}

/// Host-side driver: owns the tree, the cursor context and the root list.
pub struct Runtime {
    pub tree: HudTree,
    pub cursor: Cursor,
    roots: Vec<NodeId>,
    config: RuntimeConfig,
    frame_count: u64,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut tree = HudTree::new();
        tree.set_min_hit_extent(config.min_hit_extent);
        Self {
            tree,
            cursor: Cursor::new(),
            roots: Vec::new(),
            config,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Creates a positioned root. Roots are drawn in the order they were added.
    pub fn add_root(&mut self, element: impl Element, layout: Layout) -> NodeId {
        let id = self.tree.insert_positioned(element, layout);
        self.roots.push(id);
        id
    }

    /// Tracks an existing detached node as a root.
    pub fn attach_root(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) || self.tree.parent(id).is_some() || self.roots.contains(&id)
        {
            return false;
        }
        self.roots.push(id);
        true
    }

    /// Stops driving `id` as a root without touching the tree.
    pub fn detach_root(&mut self, id: NodeId) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| *r != id);
        self.roots.len() != before
    }

    /// Raises a root above the others.
    pub fn focus_root(&mut self, id: NodeId) -> bool {
        let Some(index) = self.roots.iter().position(|r| *r == id) else {
            return false;
        };
        let id = self.roots.remove(index);
        self.roots.push(id);
        true
    }

    /// Frees the cursor, then runs input over all roots, topmost first.
    pub fn input(&mut self, pointer: PointerState) -> Vec<HudError> {
        self.prune_roots();
        self.cursor.begin_input(pointer);
        let mut faults = Vec::new();
        for &root in self.roots.iter().rev() {
            let result = self.tree.run_input(root, &mut self.cursor);
            self.collect(result, &mut faults);
        }
        faults
    }

    pub fn pre_draw(&mut self) -> Vec<HudError> {
        self.prune_roots();
        let mut faults = Vec::new();
        for &root in &self.roots {
            let result = self.tree.run_pre_draw(root);
            self.collect(result, &mut faults);
        }
        faults
    }

    pub fn draw(&mut self, scene: &mut Scene) -> Vec<HudError> {
        self.prune_roots();
        let mut faults = Vec::new();
        for &root in &self.roots {
            let result = self.tree.run_draw(root, scene);
            self.collect(result, &mut faults);
        }
        faults
    }

    /// One full frame: input, pre-draw, draw.
    pub fn frame(&mut self, pointer: PointerState) -> Frame {
        self.frame_count += 1;
        let mut scene = Scene {
            clear_color: self.config.clear_color,
            nodes: Vec::new(),
        };

        let mut faults = self.input(pointer);
        let cursor_owner = self.cursor.arbiter.owner();
        faults.extend(self.pre_draw());
        faults.extend(self.draw(&mut scene));

        Frame {
            scene,
            cursor_owner,
            faults,
        }
    }

    fn prune_roots(&mut self) {
        let tree = &self.tree;
        self.roots
            .retain(|&r| tree.contains(r) && tree.parent(r).is_none());
    }

    fn collect(&self, result: Result<Vec<HudError>>, faults: &mut Vec<HudError>) {
        let caught = match result {
            Ok(caught) => caught,
            Err(err) => vec![err],
        };
        for err in caught {
            self.report(&err);
            faults.push(err);
        }
    }

    fn report(&self, err: &HudError) {
        if self.config.log_faults {
            log::error!("frame {}: {err}", self.frame_count);
        }
    }
}
