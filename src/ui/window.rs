//! Top level window

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    primitives::Rectangle,
};
use heapless::Vec;

use super::{ColorMode, LayerId, WatchFace, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::resources::{self, ResourceProvider};

/// Shows wherever no layer draws
const BACKGROUND_COLOR: ColorMode = ColorMode::new(0, 0, 0);

/// Maximum number of layers attached to the root layer
pub const MAX_CHILDREN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowState {
    Created,
    Loaded,
    Unloaded,
}

/// Window with a single root layer.
///
/// The root layer only records which layers are attached and in what
/// order; the watchface owns the layers themselves. Attachment order is
/// draw order.
pub struct Window {
    children: Vec<LayerId, MAX_CHILDREN>,
    state: WindowState,
}

impl Window {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            state: WindowState::Created,
        }
    }

    /// Full window area
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Attach a layer on top of the ones already attached
    pub fn add_child(&mut self, id: LayerId) {
        if self.children.contains(&id) {
            warn!("Layer {} attached twice", id);
            return;
        }
        if self.children.push(id).is_err() {
            warn!("Root layer full, dropping layer {}", id);
        }
    }

    /// Detach a layer, returns whether it was attached
    pub fn remove_child(&mut self, id: LayerId) -> bool {
        match self.children.iter().position(|child| *child == id) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Attached layers, bottom first
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    /// Run the watchface's load handler
    pub fn load<F, R>(&mut self, face: &mut F, resources: &mut R) -> Result<(), resources::Error>
    where
        F: WatchFace,
        R: ResourceProvider,
    {
        face.on_show(self, resources)?;
        self.state = WindowState::Loaded;
        debug!("Window loaded with {} layers", self.children.len());
        Ok(())
    }

    /// Run the watchface's unload handler
    pub fn unload<F, R>(&mut self, face: &mut F, resources: &mut R)
    where
        F: WatchFace,
        R: ResourceProvider,
    {
        face.on_hide(self, resources);
        if !self.children.is_empty() {
            warn!("{} layers still attached after unload", self.children.len());
            self.children.clear();
        }
        self.state = WindowState::Unloaded;
        debug!("Window unloaded");
    }

    /// Clear to the background color and draw every attached layer
    pub fn render<F, D>(&self, face: &F, target: &mut D) -> Result<(), D::Error>
    where
        F: WatchFace,
        D: DrawTarget<Color = ColorMode>,
    {
        if self.state != WindowState::Loaded {
            return Ok(());
        }

        target.fill_solid(&self.bounds(), BACKGROUND_COLOR)?;
        for id in self.children.iter() {
            face.draw_layer(*id, target)?;
        }
        Ok(())
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}
