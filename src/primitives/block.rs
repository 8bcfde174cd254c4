//! Block primitive - a plain component with background, border and label.
//!
//! Also the component that backs every container: a layout node is a
//! `Block` (or any other component) registered with a `LayoutSpec`.

use crate::error::Result;
use super::component::{Component, ComponentBase};
use super::types::ComponentProps;

/// A component that only draws its base grid.
#[derive(Debug)]
pub struct Block {
    base: ComponentBase,
}

impl Block {
    pub fn new(props: ComponentProps) -> Result<Self> {
        Ok(Self {
            base: ComponentBase::new(props)?,
        })
    }
}

impl Component for Block {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn name(&self) -> &'static str {
        "block"
    }
}
