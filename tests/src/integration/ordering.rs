//! # Arbitrary Interleaving
//!
//! Replies, duplicate replies, strays and event pushes arrive on one inbound
//! stream in an arbitrary order. Every call must settle exactly once with
//! its own reply, and every push must reach its handler.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use proptest::prelude::*;
    use serde_json::json;

    use ql_01_correlation_transport::adapters::{create_host_channel, create_inbound_channel};
    use ql_01_correlation_transport::{
        BridgeConfig, CorrelationId, CorrelationTransport, HostMessage, Reply,
    };
    use ql_02_command_facade::{names, BridgeListener, CommandFacade};

    /// One inbound delivery, by index into the issued calls.
    #[derive(Debug, Clone)]
    enum Delivery {
        Reply(usize),
        Duplicate(usize),
        Stray,
        Push,
    }

    fn script() -> impl Strategy<Value = (usize, Vec<Delivery>)> {
        (1usize..10).prop_flat_map(|n| {
            let replies = Just((0..n).map(Delivery::Reply).collect::<Vec<_>>());
            let noise = prop::collection::vec(
                prop_oneof![
                    (0..n).prop_map(Delivery::Duplicate),
                    Just(Delivery::Stray),
                    Just(Delivery::Push),
                ],
                0..8,
            );
            (replies, noise).prop_flat_map(move |(mut replies, noise)| {
                replies.extend(noise);
                (Just(n), Just(replies).prop_shuffle())
            })
        })
    }

    proptest! {
        #[test]
        fn prop_interleaved_inbound_stream((n, deliveries) in script()) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            rt.block_on(async move {
                let (host, mut requests) = create_host_channel();
                let (inbound, receiver) = create_inbound_channel();
                let transport = Arc::new(CorrelationTransport::new(
                    Arc::new(host),
                    BridgeConfig::default(),
                ));
                let facade = Arc::new(CommandFacade::new(transport));
                let listener = BridgeListener::new(Arc::clone(&facade), Arc::new(receiver)).spawn();

                let pushes = Arc::new(AtomicUsize::new(0));
                let counter = Arc::clone(&pushes);
                facade.on(names::FILE_CHANGED, move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                });

                let calls: Vec<_> = (0..n)
                    .map(|i| {
                        let facade = Arc::clone(&facade);
                        tokio::spawn(async move { facade.invoke("echo", json!({ "i": i })).await })
                    })
                    .collect();

                let mut ids = vec![None; n];
                for _ in 0..n {
                    let request = requests.recv().await.unwrap();
                    let i = request.data["i"].as_u64().unwrap() as usize;
                    ids[i] = Some(request.callback_id);
                }

                let expected_pushes = deliveries
                    .iter()
                    .filter(|d| matches!(d, Delivery::Push))
                    .count();

                for delivery in &deliveries {
                    let message = match *delivery {
                        Delivery::Reply(i) => HostMessage::Reply {
                            callback_id: ids[i].unwrap().to_string(),
                            reply: Reply::success(json!({ "echo": i })),
                        },
                        Delivery::Duplicate(i) => HostMessage::Reply {
                            callback_id: ids[i].unwrap().to_string(),
                            reply: Reply::success(json!({ "echo": "duplicate" })),
                        },
                        Delivery::Stray => HostMessage::Reply {
                            callback_id: CorrelationId::new().to_string(),
                            reply: Reply::error("stray"),
                        },
                        Delivery::Push => HostMessage::Event {
                            name: names::FILE_CHANGED.into(),
                            data: json!({ "path": "/a.md" }),
                        },
                    };
                    inbound.send(message).unwrap();
                }
                drop(inbound);
                listener.await.unwrap();

                for (i, call) in calls.into_iter().enumerate() {
                    // A duplicate may land before the real reply; whichever
                    // reply for this id came first wins, and it is never
                    // another call's payload.
                    let value = call.await.unwrap().unwrap();
                    assert!(value == json!({ "echo": i }) || value == json!({ "echo": "duplicate" }));
                }
                assert_eq!(pushes.load(Ordering::SeqCst), expected_pushes);
                assert_eq!(facade.transport().pending_count(), 0);

                let stats = facade.transport().stats();
                assert_eq!(stats.total_completed.load(Ordering::Relaxed), n as u64);
            });
        }
    }
}
