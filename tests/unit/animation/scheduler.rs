use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn FnOnce(FrameTime)>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let make = move |tag: &str| -> Box<dyn FnOnce(FrameTime)> {
        let sink = Rc::clone(&sink);
        let tag = tag.to_owned();
        Box::new(move |t: FrameTime| sink.borrow_mut().push(format!("{tag}@{}", t.frame)))
    };
    (log, make)
}

#[test]
fn callbacks_run_once_in_request_order() {
    let s = FrameScheduler::new();
    let (log, make) = recorder();
    s.request_frame(make("a"));
    s.request_frame(make("b"));
    assert_eq!(s.run_frame(0.0), 2);
    assert_eq!(s.run_frame(0.016), 0);
    assert_eq!(*log.borrow(), ["a@1", "b@1"]);
    assert_eq!(s.frame(), 2);
    assert_eq!(s.now(), 0.016);
}

#[test]
fn requests_made_during_a_frame_wait_for_the_next() {
    let s = FrameScheduler::new();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let inner = s.clone();
    let h = Rc::clone(&hits);
    s.request_frame(move |t| {
        h.borrow_mut().push(t.now);
        let h2 = Rc::clone(&h);
        inner.request_frame(move |t| h2.borrow_mut().push(t.now));
    });
    s.run_frame(1.0);
    assert_eq!(*hits.borrow(), [1.0]);
    assert_eq!(s.pending_frames(), 1);
    s.run_frame(2.0);
    assert_eq!(*hits.borrow(), [1.0, 2.0]);
}

#[test]
fn cancel_before_run() {
    let s = FrameScheduler::new();
    let (log, make) = recorder();
    let id = s.request_frame(make("a"));
    assert!(s.cancel_frame(id));
    assert!(!s.cancel_frame(id));
    s.run_frame(0.0);
    assert!(log.borrow().is_empty());
}

#[test]
fn cancel_from_an_earlier_callback_in_the_same_frame() {
    let s = FrameScheduler::new();
    let (log, make) = recorder();
    let victim: Rc<RefCell<Option<FrameRequestId>>> = Rc::new(RefCell::new(None));
    let v = Rc::clone(&victim);
    let inner = s.clone();
    s.request_frame(move |_| {
        if let Some(id) = *v.borrow() {
            assert!(inner.cancel_frame(id));
        }
    });
    *victim.borrow_mut() = Some(s.request_frame(make("victim")));
    assert_eq!(s.run_frame(0.0), 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn deferred_tasks_run_after_the_frame() {
    let s = FrameScheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let (o1, o2) = (Rc::clone(&order), Rc::clone(&order));
    let inner = s.clone();
    s.request_frame(move |_| {
        let o = Rc::clone(&o1);
        inner.defer(move || o.borrow_mut().push("deferred"));
        o1.borrow_mut().push("first");
    });
    s.request_frame(move |_| o2.borrow_mut().push("second"));
    s.run_frame(0.0);
    assert_eq!(*order.borrow(), ["first", "second", "deferred"]);
}

#[test]
fn flush_drains_nested_deferrals() {
    let s = FrameScheduler::new();
    let count = Rc::new(RefCell::new(0));
    let (c, inner) = (Rc::clone(&count), s.clone());
    s.defer(move || {
        *c.borrow_mut() += 1;
        let c2 = Rc::clone(&c);
        inner.defer(move || *c2.borrow_mut() += 1);
    });
    assert_eq!(s.flush_deferred(), 2);
    assert_eq!(*count.borrow(), 2);
}
