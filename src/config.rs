/// How far the knowledge base runs inference after each new observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Saturation {
    #[default]
    /// Repeat resolution passes until a full pass changes nothing.
    FixedPoint,
    /// Run exactly this many passes. `Passes(3)` reproduces the classic
    /// bounded behaviour and may miss inferences.
    Passes(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentConfig {
    pub saturation: Saturation,
}

/// Configuration for a single AI game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    /// Seed for mine placement; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub agent: AgentConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
            seed: None,
            agent: AgentConfig::default(),
        }
    }
}
