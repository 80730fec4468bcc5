#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use futures::channel::oneshot;

    use crate::derived::derived;
    use crate::effects::effect;
    use crate::error::LoadError;
    use crate::resource::{Status, resource, resource_with_initial};
    use crate::scope::Scope;
    use crate::signal::signal;
    use crate::task;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_effect_reruns_on_change() {
        let count = signal(0);
        let seen = Rc::new(Cell::new(-1));

        let _watch = effect({
            let count = count.clone();
            let seen = seen.clone();
            move || seen.set(count.get())
        });
        assert_eq!(seen.get(), 0);

        count.set(5);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn test_effect_dispose_detaches() {
        let count = signal(0);
        let runs = Rc::new(Cell::new(0));

        let watch = effect({
            let count = count.clone();
            let runs = runs.clone();
            move || {
                count.get();
                runs.set(runs.get() + 1);
            }
        });
        assert_eq!(runs.get(), 1);

        watch.run();
        count.set(1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_effect_untracked_read_does_not_subscribe() {
        let count = signal(0);
        let runs = Rc::new(Cell::new(0));

        let _watch = effect({
            let count = count.clone();
            let runs = runs.clone();
            move || {
                count.peek();
                runs.set(runs.get() + 1);
            }
        });
        assert_eq!(runs.get(), 1);

        count.set(1);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_effect_dependencies_are_dynamic() {
        let use_a = signal(true);
        let a = signal(1);
        let b = signal(2);
        let runs = Rc::new(Cell::new(0));

        let _watch = effect({
            let use_a = use_a.clone();
            let a = a.clone();
            let b = b.clone();
            let runs = runs.clone();
            move || {
                runs.set(runs.get() + 1);
                if use_a.get() {
                    a.get();
                } else {
                    b.get();
                }
            }
        });
        assert_eq!(runs.get(), 1);

        a.set(10);
        assert_eq!(runs.get(), 2);

        use_a.set(false);
        assert_eq!(runs.get(), 3);

        // `a` is no longer a dependency.
        a.set(20);
        assert_eq!(runs.get(), 3);

        b.set(30);
        assert_eq!(runs.get(), 4);
    }

    #[test]
    fn test_effect_write_to_own_dependency_does_not_loop() {
        let n = signal(0);
        let _watch = effect({
            let n = n.clone();
            move || {
                let v = n.get();
                if v < 1 {
                    n.set(v + 1);
                }
            }
        });
        assert_eq!(n.peek(), 1);
    }

    #[test]
    fn test_derived_recomputes() {
        let first = signal("Jane".to_string());
        let last = signal("Doe".to_string());

        let full = derived({
            let first = first.clone();
            let last = last.clone();
            move || format!("{} {}", first.get(), last.get())
        });
        assert_eq!(full.get(), "Jane Doe");

        first.set("Joan".into());
        assert_eq!(full.get(), "Joan Doe");
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || cleaned_up_clone.set(true));

        assert!(!cleaned_up.get());
        scope.dispose();
        assert!(cleaned_up.get());
    }

    #[test]
    fn test_scope_dispose_stops_effects() {
        let count = signal(0);
        let runs = Rc::new(Cell::new(0));

        let scope = Scope::new();
        scope.run(|| {
            effect({
                let count = count.clone();
                let runs = runs.clone();
                move || {
                    count.get();
                    runs.set(runs.get() + 1);
                }
            });
        });
        assert_eq!(runs.get(), 1);

        count.set(1);
        assert_eq!(runs.get(), 2);

        scope.dispose();
        count.set(2);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_task_spawn_and_drain() {
        let (tx, rx) = oneshot::channel::<i32>();
        let got = Rc::new(Cell::new(None));

        task::spawn({
            let got = got.clone();
            async move {
                if let Ok(v) = rx.await {
                    got.set(Some(v));
                }
            }
        });

        task::drain();
        assert_eq!(got.get(), None);

        tx.send(7).expect("receiver alive");
        task::drain();
        assert_eq!(got.get(), Some(7));
    }

    #[test]
    fn test_resource_initial_state() {
        let res = resource_with_initial(0, || async { Ok::<_, LoadError>(42) });

        // Readable synchronously, before any resolution.
        assert_eq!(res.value(), Some(0));
        assert!(res.loading());
        assert!(res.updated_at().is_none());
    }

    #[test]
    fn test_resource_resolves_on_drain() {
        let res = resource_with_initial(0, || async { Ok::<_, LoadError>(42) });

        task::drain();
        assert_eq!(res.value(), Some(42));
        assert!(!res.loading());
        assert_eq!(res.status(), Status::Ready);
        assert!(res.updated_at().is_some());
    }

    #[test]
    fn test_resource_without_initial_value() {
        let res = resource(|| async { Ok::<_, LoadError>("ready") });

        assert_eq!(res.value(), None);
        task::drain();
        assert_eq!(res.value(), Some("ready"));
    }

    #[test]
    fn test_resource_refetches_on_dependency_change() {
        let pending: Rc<RefCell<VecDeque<oneshot::Sender<Result<i32, LoadError>>>>> =
            Rc::new(RefCell::new(VecDeque::new()));
        let channel = signal(1u32);

        let res = resource({
            let pending = pending.clone();
            let channel = channel.clone();
            move || {
                channel.get();
                let (tx, rx) = oneshot::channel();
                pending.borrow_mut().push_back(tx);
                async move { rx.await.expect("gate dropped") }
            }
        });
        assert!(res.loading());

        let first = pending.borrow_mut().pop_front().expect("first invocation");
        first.send(Ok(10)).expect("receiver alive");
        task::drain();
        assert_eq!(res.value(), Some(10));
        assert!(!res.loading());

        // Dependency change: loading flips back on, stale value stays
        // readable until the new fetch lands.
        channel.set(2);
        assert!(res.loading());
        assert_eq!(res.value(), Some(10));

        let second = pending.borrow_mut().pop_front().expect("second invocation");
        second.send(Ok(20)).expect("receiver alive");
        task::drain();
        assert_eq!(res.value(), Some(20));
        assert!(!res.loading());
    }

    #[test]
    fn test_resource_error_is_surfaced() {
        let res = resource_with_initial(7, || async { Err::<i32, _>(LoadError::new("boom")) });

        task::drain();
        assert!(!res.loading());
        assert_eq!(res.error(), Some(LoadError::new("boom")));
        assert_eq!(res.status(), Status::Error(LoadError::new("boom")));
        // The previous value survives a failed fetch.
        assert_eq!(res.value(), Some(7));
        assert!(res.updated_at().is_none());
    }

    #[test]
    fn test_resource_discards_stale_completion() {
        let _ = env_logger::builder().is_test(true).try_init();

        let pending: Rc<RefCell<VecDeque<oneshot::Sender<Result<i32, LoadError>>>>> =
            Rc::new(RefCell::new(VecDeque::new()));
        let channel = signal(1u32);

        let res = resource({
            let pending = pending.clone();
            let channel = channel.clone();
            move || {
                channel.get();
                let (tx, rx) = oneshot::channel();
                pending.borrow_mut().push_back(tx);
                async move { rx.await.expect("gate dropped") }
            }
        });

        // Second invocation starts before the first resolves.
        channel.set(2);
        assert_eq!(pending.borrow().len(), 2);

        let first = pending.borrow_mut().pop_front().expect("first invocation");
        first.send(Ok(111)).expect("receiver alive");
        task::drain();

        // The superseded completion must not land.
        assert_eq!(res.value(), None);
        assert!(res.loading());

        let second = pending.borrow_mut().pop_front().expect("second invocation");
        second.send(Ok(222)).expect("receiver alive");
        task::drain();
        assert_eq!(res.value(), Some(222));
        assert!(!res.loading());
    }

    #[test]
    fn test_resource_scope_teardown() {
        let pending: Rc<RefCell<VecDeque<oneshot::Sender<Result<i32, LoadError>>>>> =
            Rc::new(RefCell::new(VecDeque::new()));
        let channel = signal(1u32);

        let scope = Scope::new();
        let res = scope.run(|| {
            resource({
                let pending = pending.clone();
                let channel = channel.clone();
                move || {
                    channel.get();
                    let (tx, rx) = oneshot::channel();
                    pending.borrow_mut().push_back(tx);
                    async move { rx.await.unwrap_or_else(|_| Err(LoadError::new("cancelled"))) }
                }
            })
        });
        assert_eq!(pending.borrow().len(), 1);

        scope.dispose();

        // The producer no longer re-runs on dependency changes.
        channel.set(2);
        assert_eq!(pending.borrow().len(), 1);

        // An in-flight completion from before the teardown is discarded.
        let first = pending.borrow_mut().pop_front().expect("first invocation");
        first.send(Ok(10)).expect("receiver alive");
        task::drain();
        assert_eq!(res.value(), None);
        assert!(res.loading());
    }

    #[test]
    fn test_resource_refresh() {
        let calls = Rc::new(Cell::new(0));
        let res = resource({
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { Ok::<_, LoadError>(n) }
            }
        });
        assert_eq!(calls.get(), 1);

        task::drain();
        assert_eq!(res.value(), Some(1));

        res.refresh();
        assert_eq!(calls.get(), 2);
        assert!(res.loading());

        task::drain();
        assert_eq!(res.value(), Some(2));
    }

    #[test]
    fn test_resource_record_changes_drive_effects() {
        let res = resource_with_initial(0, || async { Ok::<_, LoadError>(1) });
        let observed = Rc::new(RefCell::new(Vec::new()));

        let _watch = effect({
            let res = res.clone();
            let observed = observed.clone();
            move || observed.borrow_mut().push((res.value(), res.loading()))
        });
        assert_eq!(&*observed.borrow(), &[(Some(0), true)]);

        task::drain();
        assert_eq!(&*observed.borrow(), &[(Some(0), true), (Some(1), false)]);
    }
}
