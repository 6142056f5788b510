mod store;

#[rustfmt::skip]
pub use {
    store::StoreTxn,
    store::WorkflowStore,
};
