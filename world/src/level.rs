//! Level progression driven by the shared apple quota.

#[derive(Clone, Debug)]
pub(crate) struct LevelDirector {
    level: u32,
    apples_this_level: u32,
    quota: u32,
}

impl LevelDirector {
    pub(crate) fn new(quota: u32) -> Self {
        Self {
            level: 1,
            apples_this_level: 0,
            quota,
        }
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn apples_this_level(&self) -> u32 {
        self.apples_this_level
    }

    /// Counts an apple eaten by either snake.
    pub(crate) fn record_apple(&mut self) {
        self.apples_this_level += 1;
    }

    pub(crate) fn quota_met(&self) -> bool {
        self.apples_this_level >= self.quota
    }

    /// Moves to the next level and returns its number.
    pub(crate) fn advance(&mut self) -> u32 {
        self.level += 1;
        self.apples_this_level = 0;
        self.level
    }

    pub(crate) fn reset(&mut self) {
        self.level = 1;
        self.apples_this_level = 0;
    }
}
