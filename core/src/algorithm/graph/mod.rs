//! Network flow algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod min_cut;
pub mod multi_terminal;

pub use self::max_flow::{find_augmenting_path, EdmondsKarp, FlowConfig};
pub use self::min_cut::{cut_capacity, source_side};
pub use self::multi_terminal::{compute_max_flow, FlowProblem, MaxFlowResult, MultiTerminalReducer};
