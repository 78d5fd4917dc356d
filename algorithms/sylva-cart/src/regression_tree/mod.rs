mod algorithm;
mod export;
mod hyperparams;
mod iter;
mod node;
mod pruning;

pub use algorithm::*;
pub use export::*;
pub use hyperparams::*;
pub use iter::*;
pub use node::{Leaf, NodeArena, NodeId, Split, TreeNode};
pub use pruning::*;
