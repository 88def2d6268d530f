//! Drives a multi-cycle interaction chain through the resolver the way a
//! routing layer would: each cycle's committed state and button values are
//! fed into the next cycle's request context.

use placard_core::{resolve_context, RenderCycle, RequestContext, ResolveParams};
use placard_types::{FramePayload, InteractionStatus, RESET_VALUE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tally {
    presses: u32,
}

struct Chain {
    context: RequestContext<Tally>,
}

impl Chain {
    fn first_load() -> Self {
        Self {
            context: RequestContext {
                initial_path: "/counter".to_string(),
                payload: None,
                previous_button_values: Vec::new(),
                previous_state: None,
                request_url: "https://host.example/counter".to_string(),
                status: InteractionStatus::Initial,
                url: "https://host.example/counter".to_string(),
                verified: true,
            },
        }
    }

    /// Simulates the client posting a button press back to the same frame.
    fn press(&mut self, values: &[Option<&str>], index: u8) {
        self.context.previous_button_values =
            values.iter().map(|v| v.map(str::to_string)).collect();
        self.context.payload = Some(FramePayload {
            button_index: Some(index),
            ..FramePayload::default()
        });
        self.context.status = InteractionStatus::Response;
    }

    fn resolve(&self) -> placard_core::FrameContext<Tally> {
        resolve_context(ResolveParams {
            context: self.context.clone(),
            cycle: RenderCycle::Full,
            initial_state: Tally::default(),
            prior_state: None,
        })
    }

    /// Records the cycle's outcome the way the routing layer persists it.
    fn record(&mut self, state: Tally) {
        self.context.previous_state = Some(state);
    }
}

#[tokio::test]
async fn chain_accumulates_then_resets() {
    let mut chain = Chain::first_load();

    // Cycle 1: first load, no payload, no derivation runs.
    let mut resolved = chain.resolve();
    assert_eq!(resolved.status, InteractionStatus::Initial);
    let state = resolved
        .derive_state(|mut s| async move {
            s.presses += 1;
            Ok(s)
        })
        .await
        .unwrap()
        .clone();
    assert_eq!(state.presses, 0);
    chain.record(resolved.into_state());

    // Cycles 2 and 3: live responses, each derivation increments the tally.
    for expected in 1..=2 {
        chain.press(&[Some("count")], 1);
        let mut resolved = chain.resolve();
        assert_eq!(resolved.status, InteractionStatus::Response);
        let state = resolved
            .derive_state(|mut s| async move {
                s.presses += 1;
                Ok(s)
            })
            .await
            .unwrap()
            .clone();
        assert_eq!(state.presses, expected);
        chain.record(resolved.into_state());
    }

    // Cycle 4: reset press abandons the accumulated state and rebases the
    // URL to the chain's first frame.
    chain.press(&[Some("count"), Some(RESET_VALUE)], 2);
    let resolved = chain.resolve();
    assert_eq!(resolved.status, InteractionStatus::Initial);
    assert_eq!(resolved.url, "https://host.example/counter");

    // The next cycle starts over from the initial state because the reset
    // cycle resolved to `Initial`.
    chain.context.status = resolved.status;
    chain.record(resolved.into_state());
    chain.context.payload = None;
    let fresh = chain.resolve();
    assert_eq!(fresh.state(), &Tally::default());
}
