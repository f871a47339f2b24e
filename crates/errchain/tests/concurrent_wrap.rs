//! Many tasks wrapping one shared base error

use errchain::{ChainError, cause, code, dev_message, message, messages, with_code, with_dev_message, with_message};
use pretty_assertions::assert_eq;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_base_is_wrapped_independently() {
    let base = with_code(Some(with_message(None, ["storage unavailable"])), "PANIC");
    let before = base.to_string();

    let mut tasks = JoinSet::new();
    for worker in 0..32 {
        let base = base.clone();
        tasks.spawn(async move {
            let err = with_dev_message(Some(base), [format!("worker {worker}")]);
            (worker, err)
        });
    }

    let mut seen = 0;
    while let Some(joined) = tasks.join_next().await {
        let (worker, err) = joined.expect("task completed");
        assert!(cause(&err).ptr_eq(cause(&base)));
        assert_eq!(code(&err), "PANIC");
        assert_eq!(message::<&str>(&err, &[]), "storage unavailable");
        assert_eq!(dev_message(&err), format!("worker {worker}"));
        seen += 1;
    }

    assert_eq!(seen, 32);
    assert_eq!(base.to_string(), before);
    assert_eq!(messages(&base), vec!["storage unavailable"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn chains_are_readable_from_many_threads() {
    let err: ChainError = with_message(Some(with_dev_message(None, ["cache miss"])), ["retry later"]);

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let err = err.clone();
        tasks.spawn_blocking(move || (err.to_string(), dev_message(&err)));
    }

    while let Some(joined) = tasks.join_next().await {
        let (display, dev) = joined.expect("task completed");
        assert_eq!(display, "[CRITICAL] cache miss (retry later)");
        assert_eq!(dev, "cache miss");
    }
}
