//! Library definition for ustree.
pub mod buffers;
pub mod forest;
pub mod graph;
pub mod init;
pub mod mixer;
pub mod perm;
pub mod spanning_tree;
