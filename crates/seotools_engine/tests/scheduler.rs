use std::sync::{Arc, Mutex};
use std::time::Duration;

use seotools_engine::{EngineEvent, EventSink, Scheduler, Timer};

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn redirect(task_id: &str) -> Timer {
    Timer::Redirect {
        task_id: task_id.to_string(),
    }
}

#[tokio::test]
async fn timer_fires_after_delay() {
    let sink = Arc::new(TestSink::default());
    let scheduler = Scheduler::new(tokio::runtime::Handle::current(), sink.clone());

    scheduler.schedule(Duration::from_millis(20), redirect("t1"));
    assert!(sink.take().is_empty());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(sink.take(), vec![EngineEvent::TimerFired(redirect("t1"))]);
}

#[tokio::test]
async fn cancelled_timer_never_fires() {
    let sink = Arc::new(TestSink::default());
    let scheduler = Scheduler::new(tokio::runtime::Handle::current(), sink.clone());

    let handle = scheduler.schedule(Duration::from_millis(30), Timer::NoticeDismissal { id: 4 });
    scheduler.schedule(Duration::from_millis(30), Timer::NoticeDismissal { id: 5 });
    handle.cancel();
    assert!(handle.is_cancelled());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(
        sink.take(),
        vec![EngineEvent::TimerFired(Timer::NoticeDismissal { id: 5 })]
    );
}

#[tokio::test]
async fn shutdown_cancels_every_pending_timer() {
    let sink = Arc::new(TestSink::default());
    let scheduler = Scheduler::new(tokio::runtime::Handle::current(), sink.clone());

    let first = scheduler.schedule(Duration::from_millis(30), redirect("a"));
    scheduler.schedule(Duration::from_millis(40), redirect("b"));
    scheduler.shutdown();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(first.is_cancelled());
    assert!(sink.take().is_empty());
}
