//! Visibility-triggered enter animations.
//!
//! An element animates in the first time enough of it intersects the
//! viewport. Where intersections come from is abstracted behind
//! [`VisibilitySource`]: a browser binding would back it with an
//! intersection observer, the static renderer uses [`ImmediateSource`]
//! (no viewport, so everything is visible), and tests script events by hand.
//!
//! [`VisibilityAnimator`] owns the subscriptions it makes. An element is
//! unsubscribed as soon as it has become visible (the flag is sticky), and
//! every remaining subscription is released on [`VisibilityAnimator::teardown`]
//! or drop, so no callback outlives the view that registered it.

use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// One intersection report: how much of the subscribed element is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    pub subscription: SubscriptionId,
    /// Visible fraction of the element, `0.0..=1.0`.
    pub ratio: f64,
}

pub trait VisibilitySource {
    /// Start reporting intersections for `element`.
    fn subscribe(&mut self, element: &str, threshold: f64) -> SubscriptionId;

    /// Stop reporting for a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Reports accumulated since the last call.
    fn take_events(&mut self) -> Vec<IntersectionEvent>;
}

/// A source with no viewport: every element is fully visible on subscribe.
#[derive(Debug, Default)]
pub struct ImmediateSource {
    next_id: u64,
    pending: Vec<IntersectionEvent>,
}

impl ImmediateSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisibilitySource for ImmediateSource {
    fn subscribe(&mut self, _element: &str, _threshold: f64) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.pending.push(IntersectionEvent {
            subscription: id,
            ratio: 1.0,
        });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.pending.retain(|e| e.subscription != id);
    }

    fn take_events(&mut self) -> Vec<IntersectionEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[derive(Debug)]
struct Watched {
    subscription: Option<SubscriptionId>,
    visible: bool,
}

pub struct VisibilityAnimator<S: VisibilitySource> {
    source: S,
    threshold: f64,
    elements: BTreeMap<String, Watched>,
}

impl<S: VisibilitySource> VisibilityAnimator<S> {
    pub fn new(source: S, threshold: f64) -> Self {
        Self {
            source,
            threshold,
            elements: BTreeMap::new(),
        }
    }

    /// Start watching `element`. Watching an element twice is a no-op.
    pub fn watch(&mut self, element: &str) {
        if self.elements.contains_key(element) {
            return;
        }
        let id = self.source.subscribe(element, self.threshold);
        self.elements.insert(
            element.to_string(),
            Watched {
                subscription: Some(id),
                visible: false,
            },
        );
    }

    /// Apply pending intersection reports. Returns the elements that became
    /// visible in this call.
    pub fn pump(&mut self) -> Vec<String> {
        let mut revealed = Vec::new();
        for event in self.source.take_events() {
            if event.ratio < self.threshold {
                continue;
            }
            let Some((name, watched)) = self
                .elements
                .iter_mut()
                .find(|(_, w)| w.subscription == Some(event.subscription))
            else {
                continue;
            };
            watched.visible = true;
            watched.subscription = None;
            self.source.unsubscribe(event.subscription);
            debug!(element = %name, "element revealed");
            revealed.push(name.clone());
        }
        revealed
    }

    pub fn is_visible(&self, element: &str) -> bool {
        self.elements.get(element).is_some_and(|w| w.visible)
    }

    /// Subscriptions still waiting for their element to appear.
    pub fn active_subscriptions(&self) -> usize {
        self.elements
            .values()
            .filter(|w| w.subscription.is_some())
            .count()
    }

    /// Release every outstanding subscription. Visibility flags are kept.
    pub fn teardown(&mut self) {
        for watched in self.elements.values_mut() {
            if let Some(id) = watched.subscription.take() {
                self.source.unsubscribe(id);
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: VisibilitySource> Drop for VisibilityAnimator<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    /// Source whose events are pushed by the test. Shares its live
    /// subscription set so assertions can run after the animator is dropped.
    #[derive(Default)]
    struct ScriptedSource {
        next_id: u64,
        live: Rc<RefCell<BTreeSet<SubscriptionId>>>,
        queue: Rc<RefCell<Vec<IntersectionEvent>>>,
    }

    impl VisibilitySource for ScriptedSource {
        fn subscribe(&mut self, _element: &str, _threshold: f64) -> SubscriptionId {
            let id = SubscriptionId(self.next_id);
            self.next_id += 1;
            self.live.borrow_mut().insert(id);
            id
        }

        fn unsubscribe(&mut self, id: SubscriptionId) {
            self.live.borrow_mut().remove(&id);
        }

        fn take_events(&mut self) -> Vec<IntersectionEvent> {
            std::mem::take(&mut *self.queue.borrow_mut())
        }
    }

    fn scripted() -> (
        ScriptedSource,
        Rc<RefCell<BTreeSet<SubscriptionId>>>,
        Rc<RefCell<Vec<IntersectionEvent>>>,
    ) {
        let source = ScriptedSource::default();
        let live = Rc::clone(&source.live);
        let queue = Rc::clone(&source.queue);
        (source, live, queue)
    }

    fn event(id: u64, ratio: f64) -> IntersectionEvent {
        IntersectionEvent {
            subscription: SubscriptionId(id),
            ratio,
        }
    }

    #[test]
    fn element_becomes_visible_past_threshold() {
        let (source, live, queue) = scripted();
        let mut a = VisibilityAnimator::new(source, 0.1);
        a.watch("card-1");
        assert!(!a.is_visible("card-1"));

        queue.borrow_mut().push(event(0, 0.05));
        assert!(a.pump().is_empty());
        assert!(!a.is_visible("card-1"));

        queue.borrow_mut().push(event(0, 0.5));
        assert_eq!(a.pump(), vec!["card-1".to_string()]);
        assert!(a.is_visible("card-1"));
        assert!(live.borrow().is_empty(), "revealed element should be unsubscribed");
    }

    #[test]
    fn visibility_is_sticky() {
        let (source, _live, queue) = scripted();
        let mut a = VisibilityAnimator::new(source, 0.1);
        a.watch("hero");
        queue.borrow_mut().push(event(0, 1.0));
        a.pump();
        queue.borrow_mut().push(event(0, 0.0));
        a.pump();
        assert!(a.is_visible("hero"));
    }

    #[test]
    fn watching_twice_subscribes_once() {
        let (source, live, _queue) = scripted();
        let mut a = VisibilityAnimator::new(source, 0.1);
        a.watch("x");
        a.watch("x");
        assert_eq!(live.borrow().len(), 1);
        assert_eq!(a.active_subscriptions(), 1);
    }

    #[test]
    fn teardown_releases_all_subscriptions() {
        let (source, live, _queue) = scripted();
        let mut a = VisibilityAnimator::new(source, 0.1);
        a.watch("a");
        a.watch("b");
        assert_eq!(live.borrow().len(), 2);
        a.teardown();
        assert!(live.borrow().is_empty());
        assert_eq!(a.active_subscriptions(), 0);
    }

    #[test]
    fn drop_releases_subscriptions() {
        let (source, live, _queue) = scripted();
        {
            let mut a = VisibilityAnimator::new(source, 0.1);
            a.watch("a");
        }
        assert!(live.borrow().is_empty());
    }

    #[test]
    fn events_for_unknown_subscriptions_are_ignored() {
        let (source, _live, queue) = scripted();
        let mut a = VisibilityAnimator::new(source, 0.1);
        a.watch("a");
        queue.borrow_mut().push(event(42, 1.0));
        assert!(a.pump().is_empty());
        assert!(!a.is_visible("a"));
    }

    #[test]
    fn immediate_source_reveals_everything() {
        let mut a = VisibilityAnimator::new(ImmediateSource::new(), 0.1);
        a.watch("a");
        a.watch("b");
        let mut revealed = a.pump();
        revealed.sort();
        assert_eq!(revealed, vec!["a", "b"]);
        assert_eq!(a.active_subscriptions(), 0);
    }
}
