use crate::ir::{Block, Section};

/// Wrap children in a section. Purely structural: the caller picks the level.
pub fn section(title: impl Into<String>, level: usize, children: Vec<Block>) -> Block {
    Block::Section(Section {
        title: title.into(),
        level,
        children,
    })
}

/// Nesting depth of the section being built. Levels are never written as
/// literals at call sites; each nested section is one deeper than its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth(usize);

impl Depth {
    /// Depth of the document root section.
    pub fn root() -> Self {
        Depth(1)
    }

    pub fn level(self) -> usize {
        self.0
    }

    pub fn child(self) -> Self {
        Depth(self.0 + 1)
    }

    /// Build a section at this depth. `children` receives the depth its own
    /// nested sections should use.
    pub fn section<E>(
        self,
        title: impl Into<String>,
        children: impl FnOnce(Depth) -> Result<Vec<Block>, E>,
    ) -> Result<Block, E> {
        let children = children(self.child())?;
        Ok(section(title, self.0, children))
    }
}
