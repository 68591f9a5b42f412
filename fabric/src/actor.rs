/*
 * SPDX-FileCopyrightText: Copyright 2024 LG Electronics Inc.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The resource actor: one OS thread per node, driving `lifecycle`'s
//! dispatcher over a pair of ZeroMQ sockets. The actor is role-agnostic —
//! `RoleConfig` is the only thing that differs between a `plant`, `line`,
//! `module` or `device` process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};

use lifecycle::{HandlerTable, Payload, Signal, State, Transition, Value};

use crate::error::ActorError;
use crate::peer::PeerRegistry;
use crate::role::RoleConfig;

/// Messages a host (a role's `main`, or a test) can inject into a running
/// actor over its self-control channel.
#[derive(Debug)]
pub enum ControlMessage {
    /// Equivalent to an operator Stop signal followed by a shutdown.
    Stop,
    /// Injects a new operator signal at the actor's current state.
    InjectSignal(Signal),
}

/// Wraps the receiving half of the control channel so it can travel
/// through `creating`'s opaque `Payload` (payload[0] is the self-control
/// channel) and be taken out exactly once by the handler that installs it
/// on the `Resource`.
pub struct ControlPipe {
    inner: Mutex<Option<mpsc::Receiver<ControlMessage>>>,
}

impl ControlPipe {
    pub fn new(rx: mpsc::Receiver<ControlMessage>) -> Self {
        ControlPipe { inner: Mutex::new(Some(rx)) }
    }

    pub fn take(&self) -> Option<mpsc::Receiver<ControlMessage>> {
        self.inner.lock().expect("control pipe mutex poisoned").take()
    }
}

/// Cooperative cancellation flag shared between a role's async host and its
/// blocking actor thread.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Interrupt(Arc::new(AtomicBool::new(false)))
    }

    pub fn trip(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The live state a resource actor carries between dispatch cycles: the
/// two transports, the downstream peer registry and the liveness/backoff
/// bookkeeping for the upstream link.
pub struct Resource {
    pub(crate) name: String,
    pub(crate) role: RoleConfig,
    pub(crate) ctx: zmq::Context,
    pub(crate) upstream: Option<zmq::Socket>,
    pub(crate) downstream: Option<zmq::Socket>,
    pub(crate) control_rx: Option<mpsc::Receiver<ControlMessage>>,
    pub(crate) ready_tx: Option<oneshot::Sender<()>>,
    pub(crate) timing: common::settings::Timing,
    pub(crate) liveness: u32,
    pub(crate) reconnect_interval_ms: u64,
    pub(crate) next_heartbeat_due: Instant,
    pub(crate) peers: PeerRegistry,
    pub(crate) last_state: State,
    pub(crate) last_signal: Signal,
    pub(crate) interrupt: Interrupt,
}

impl Resource {
    fn blank(role: RoleConfig, ctx: zmq::Context, interrupt: Interrupt, ready_tx: oneshot::Sender<()>) -> Self {
        let timing = common::get_settings().timing.clone();
        Resource {
            name: role.node_name.clone(),
            role,
            ctx,
            upstream: None,
            downstream: None,
            control_rx: None,
            ready_tx: Some(ready_tx),
            liveness: timing.heartbeat_liveness,
            reconnect_interval_ms: timing.interval_init_ms,
            next_heartbeat_due: Instant::now(),
            peers: PeerRegistry::new(),
            last_state: State::Creating,
            last_signal: Signal::Run,
            interrupt,
            timing,
        }
    }

    /// Drains the control channel without blocking. `Stop` trips the shared
    /// interrupt and is swallowed here; an injected signal is handed back to
    /// the dispatcher to consult between transitions.
    pub(crate) fn poll_injected_signal(&mut self) -> Option<Signal> {
        let rx = self.control_rx.as_mut()?;
        match rx.try_recv() {
            Ok(ControlMessage::Stop) => {
                self.interrupt.trip();
                None
            }
            Ok(ControlMessage::InjectSignal(signal)) => Some(signal),
            Err(_) => None,
        }
    }

    pub(crate) fn admit_peer(&mut self, identity: Vec<u8>, symbolic_id: u8) {
        let expiry_span = std::time::Duration::from_millis(
            self.timing.heartbeat_interval_ms * self.timing.heartbeat_liveness as u64,
        );
        self.peers.admit(identity, symbolic_id, Instant::now(), expiry_span);
    }
}

/// A spawned actor's handle: the sending half of its control channel, its
/// interrupt flag and the blocking-task join handle.
pub struct ActorHandle {
    pub control_tx: mpsc::Sender<ControlMessage>,
    pub interrupt: Interrupt,
    join: tokio::task::JoinHandle<()>,
}

impl ActorHandle {
    /// Waits for the actor to finish (normal exit or after `Stop`).
    pub async fn join(self) {
        let _ = self.join.await;
    }

    /// Requests a clean shutdown and waits for the actor thread to exit.
    pub async fn stop(self) {
        let _ = self.control_tx.send(ControlMessage::Stop).await;
        self.join().await;
    }
}

/// Spawns a resource actor on a dedicated OS thread (via
/// `tokio::task::spawn_blocking`, since the transport is the synchronous
/// `zmq` crate) and bootstraps it straight into `(Creating, Run)`.
///
/// The returned future resolves once `creating`/`initializing` have run, so
/// the caller knows the node's sockets are open before proceeding (the
/// `zactor`-style readiness handshake `line.c`'s `resource_actor` performs
/// over its pipe, realised here with a `oneshot` instead of a signal frame).
pub async fn spawn(role: RoleConfig) -> ActorHandle {
    let interrupt = Interrupt::new();
    let (control_tx, control_rx) = mpsc::channel(16);
    let (ready_tx, ready_rx) = oneshot::channel();

    let interrupt_for_task = interrupt.clone();
    let join = tokio::task::spawn_blocking(move || {
        run(role, control_rx, interrupt_for_task, ready_tx);
    });

    let _ = ready_rx.await;
    ActorHandle { control_tx, interrupt, join }
}

fn handler_table() -> HandlerTable<Resource> {
    use crate::handlers::*;
    HandlerTable::new(creating, initializing, configuring, running, pausing, finalizing, deleting)
}

fn bootstrap_transition(control_rx: mpsc::Receiver<ControlMessage>, name: String) -> Result<Transition, ActorError> {
    let pipe: Value = Arc::new(ControlPipe::new(control_rx));
    let name_value: Value = Arc::new(name);
    let payload = Payload::zip(vec!["control_pipe", "name"], vec![pipe, name_value])?;
    Ok(Transition::new(State::Creating, payload))
}

fn unwind(resource: &mut Resource, handlers: &HandlerTable<Resource>) {
    tracing::warn!(node = %resource.name, "unwinding to pausing -> finalizing -> deleting");
    handlers.dispatch(State::Pausing, resource, &Payload::empty());
    handlers.dispatch(State::Finalizing, resource, &Payload::empty());
    handlers.dispatch(State::Deleting, resource, &Payload::empty());
}

/// The synchronous dispatch loop. `Running` and `Pausing` transitions are
/// re-entered in an inner loop — their handlers perform one
/// poll-and-service iteration each and return control here, rather than
/// blocking forever themselves — until the handler aborts, the actor is
/// interrupted, or a freshly injected signal re-expands the run-list.
fn run(role: RoleConfig, control_rx: mpsc::Receiver<ControlMessage>, interrupt: Interrupt, ready_tx: oneshot::Sender<()>) {
    let name = role.node_name.clone();
    let ctx = zmq::Context::new();
    let mut resource = Resource::blank(role, ctx, interrupt, ready_tx);
    let handlers = handler_table();

    let bootstrap = match bootstrap_transition(control_rx, name.clone()) {
        Ok(transition) => transition,
        Err(err) => {
            tracing::error!(node = %name, error = %err, "failed to build bootstrap transition");
            return;
        }
    };
    let mut run_list = lifecycle::planner::bootstrap(bootstrap, State::Creating, Signal::Run);

    while !run_list.is_empty() && !resource.interrupt.is_set() {
        let transition = match run_list.pop() {
            Some(t) => t,
            None => break,
        };
        resource.last_state = transition.target;
        let persistent = matches!(transition.target, State::Running | State::Pausing);

        let status = loop {
            let status = handlers.dispatch(transition.target, &mut resource, &transition.payload);
            if status < 0 || !persistent || resource.interrupt.is_set() {
                break status;
            }
            if let Some(signal) = resource.poll_injected_signal() {
                resource.last_signal = signal;
                let expansion = lifecycle::planner::expand_run_list(transition.target, signal);
                run_list.push_all(expansion);
                break status;
            }
            // `running`'s handler already suspends inside its own socket
            // poll (bounded by the heartbeat interval); `pausing` does no
            // I/O at all, so without a suspension point here this branch
            // would busy-spin re-invoking it. The actor should suspend only
            // inside the socket poll and reconnect sleeps.
            if transition.target == State::Pausing {
                std::thread::sleep(Duration::from_millis(resource.timing.heartbeat_interval_ms));
            }
        };

        if status < 0 {
            unwind(&mut resource, &handlers);
            return;
        }

        if run_list.is_empty() && !resource.interrupt.is_set() {
            if let Some(signal) = resource.poll_injected_signal() {
                resource.last_signal = signal;
                let expansion = lifecycle::planner::expand_run_list(resource.last_state, signal);
                run_list.push_all(expansion);
            }
        }
    }

    if resource.interrupt.is_set() && !matches!(resource.last_state, State::Deleting) {
        unwind(&mut resource, &handlers);
    }
    tracing::info!(node = %resource.name, "actor stopped");
}

#[cfg(test)]
mod unwind_tests {
    use super::*;
    use crate::role::UpstreamKind;
    use lifecycle::HandlerTable;
    use std::cell::RefCell;

    thread_local! {
        static ORDER: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
    }

    fn noop(_r: &mut Resource, _p: &Payload) -> i32 {
        0
    }
    fn record_pausing(_r: &mut Resource, _p: &Payload) -> i32 {
        ORDER.with(|o| o.borrow_mut().push("pausing"));
        0
    }
    fn record_finalizing(_r: &mut Resource, _p: &Payload) -> i32 {
        ORDER.with(|o| o.borrow_mut().push("finalizing"));
        0
    }
    fn record_deleting(_r: &mut Resource, _p: &Payload) -> i32 {
        ORDER.with(|o| o.borrow_mut().push("deleting"));
        0
    }

    /// A handler abort unwinds through exactly one call each to pausing,
    /// finalizing, deleting, in that order. Exercised directly against
    /// `unwind` with stand-in handlers so it needs no live transport.
    #[test]
    fn unwind_runs_pausing_finalizing_deleting_in_order() {
        ORDER.with(|o| o.borrow_mut().clear());

        let role = RoleConfig {
            node_name: "test".to_string(),
            upstream_kind: UpstreamKind::Dealer,
            upstream_endpoint: "tcp://localhost:1".to_string(),
            downstream_bind: None,
            symbolic_id: None,
            required_peers: Vec::new(),
        };
        let (ready_tx, _ready_rx) = oneshot::channel();
        let mut resource = Resource::blank(role, zmq::Context::new(), Interrupt::new(), ready_tx);

        let table = HandlerTable::new(noop, noop, noop, noop, record_pausing, record_finalizing, record_deleting);
        unwind(&mut resource, &table);

        ORDER.with(|o| assert_eq!(*o.borrow(), vec!["pausing", "finalizing", "deleting"]));
    }
}
