// Readiness tracking for images the viewport draws.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Which image a draw call or load notification refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageLayer {
    Background,
    GuessSprite,
    ActualSprite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageSlot {
    pub src: String,
    pub status: ImageStatus,
    /// Bumped on every new source so late completions of older loads are dropped.
    pub generation: u64,
}

impl ImageSlot {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            status: ImageStatus::Loading,
            generation: 0,
        }
    }

    pub fn replace(&mut self, src: impl Into<String>) -> u64 {
        self.src = src.into();
        self.status = ImageStatus::Loading;
        self.generation += 1;
        self.generation
    }

    /// Returns false when the notification belongs to an abandoned load.
    pub fn settle(&mut self, generation: u64, ok: bool) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = if ok {
            ImageStatus::Loaded
        } else {
            ImageStatus::Failed
        };
        true
    }

    pub fn is_ready(&self) -> bool {
        self.status == ImageStatus::Loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_generation_is_ignored() {
        let mut slot = ImageSlot::new("a.png");
        let next = slot.replace("b.png");
        assert!(!slot.settle(0, true));
        assert_eq!(slot.status, ImageStatus::Loading);
        assert!(slot.settle(next, false));
        assert_eq!(slot.status, ImageStatus::Failed);
        assert!(!slot.is_ready());
    }
}
