use sapirag_core::BusyState;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Print the loader status to stderr whenever an action starts
pub fn spawn(mut rx: watch::Receiver<BusyState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut shown: Option<String> = None;
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.busy {
                if shown.as_deref() != Some(state.status.as_str()) {
                    eprintln!("⏳ {}", state.status);
                    shown = Some(state.status);
                }
            } else {
                shown = None;
            }
        }
    })
}
