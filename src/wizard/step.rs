use serde::Serialize;

/// The ordered steps of the load balancer wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Identity,
    BasicConfig,
    Network,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Identity, Step::BasicConfig, Step::Network, Step::Confirmation];
    pub const COUNT: usize = Step::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Step::Identity => 0,
            Step::BasicConfig => 1,
            Step::Network => 2,
            Step::Confirmation => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    pub fn is_last(self) -> bool {
        self.index() == Step::COUNT - 1
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Identity => "Identity & region",
            Step::BasicConfig => "Basic configuration",
            Step::Network => "Network settings",
            Step::Confirmation => "Review & create",
        }
    }
}
