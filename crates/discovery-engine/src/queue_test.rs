use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;

#[tokio::test]
async fn processes_each_item_at_most_once_and_expands_graph() {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);

    let process_item = move |item: u32| -> BoxFuture<'static, Vec<u32>> {
        let calls = Arc::clone(&calls_clone);
        Box::pin(async move {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![item]
        })
    };

    let get_next_items = |item: u32| -> BoxFuture<'static, Vec<u32>> {
        Box::pin(async move {
            if item == 1 {
                vec![2, 3]
            } else {
                vec![]
            }
        })
    };

    let results =
        process_with_queue(vec![1, 1], 4, Duration::from_secs(5), process_item, get_next_items)
            .await;

    assert_eq!(results, [1, 2, 3].into_iter().collect::<HashSet<_>>());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn empty_initial_items_returns_empty_immediately() {
    let process_item = |_: u32| -> BoxFuture<'static, Vec<u32>> { Box::pin(async { vec![] }) };
    let get_next_items = |_: u32| -> BoxFuture<'static, Vec<u32>> { Box::pin(async { vec![] }) };

    let results =
        process_with_queue(vec![], 4, Duration::from_secs(5), process_item, get_next_items).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn timed_out_item_is_swallowed_not_propagated() {
    let process_item = |item: u32| -> BoxFuture<'static, Vec<u32>> {
        Box::pin(async move {
            if item == 1 {
                tokio::time::sleep(Duration::from_secs(10)).await;
            }
            vec![item]
        })
    };
    let get_next_items = |_: u32| -> BoxFuture<'static, Vec<u32>> { Box::pin(async { vec![] }) };

    let results = process_with_queue(
        vec![1, 2],
        2,
        Duration::from_millis(50),
        process_item,
        get_next_items,
    )
    .await;

    assert_eq!(results, [2].into_iter().collect::<HashSet<_>>());
}
