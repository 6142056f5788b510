//! Concurrency properties of the sequence allocator.

use std::{collections::HashSet, sync::Arc};

use domain_workflow::{
    model::vo::SequenceScope,
    repository::{StoreTxn, WorkflowStore},
};
use infrastructure_persistence::MemoryWorkflowStore;

#[tokio::test]
async fn concurrent_allocation_yields_distinct_values() {
    let store = Arc::new(MemoryWorkflowStore::default());

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut txn = store.begin().await.unwrap();
                let value = txn.next_sequence(SequenceScope::Callout).await.unwrap();
                txn.commit().await.unwrap();
                value
            })
        })
        .collect();

    let values: Vec<u32> =
        futures::future::join_all(handles).await.into_iter().map(|v| v.unwrap()).collect();
    let distinct: HashSet<u32> = values.iter().copied().collect();

    assert_eq!(distinct.len(), 32);
    assert!(values.iter().all(|value| *value >= SequenceScope::FLOOR));
    assert_eq!(distinct.iter().max().copied(), Some(SequenceScope::FLOOR + 31));
}

#[tokio::test]
async fn scopes_allocate_independently_under_interleaving() {
    let store = Arc::new(MemoryWorkflowStore::default());
    let customer = uuid::Uuid::new_v4();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            let scope = if i % 2 == 0 {
                SequenceScope::Schedule
            } else {
                SequenceScope::Sro(Some(customer))
            };
            tokio::spawn(async move {
                let mut txn = store.begin().await.unwrap();
                let value = txn.next_sequence(scope.clone()).await.unwrap();
                txn.commit().await.unwrap();
                (scope, value)
            })
        })
        .collect();

    let mut schedule_values = Vec::new();
    let mut sro_values = Vec::new();
    for result in futures::future::join_all(handles).await {
        let (scope, value) = result.unwrap();
        match scope {
            SequenceScope::Schedule => schedule_values.push(value),
            _ => sro_values.push(value),
        }
    }

    schedule_values.sort();
    sro_values.sort();
    let expected: Vec<u32> = (0..16).map(|i| SequenceScope::FLOOR + i).collect();
    assert_eq!(schedule_values, expected);
    assert_eq!(sro_values, expected);
}
