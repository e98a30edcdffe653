// Shared test helpers: scripted interface source and a presenter that records frames
#![allow(dead_code)]

use netspeed::interface_repo::{InterfaceRepo, InterfaceSource, QueryLimits};
use netspeed::models::*;
use netspeed::presenter::{Frame, Presenter};
use netspeed::query::QueryError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted responses in order; the last response repeats once the script runs out.
#[derive(Default)]
pub struct FakeSource {
    inventory: Mutex<VecDeque<Result<Vec<AdapterInfo>, QueryError>>>,
    tables: Mutex<VecDeque<Result<Vec<InterfaceSnapshot>, QueryError>>>,
    inventory_hints: Mutex<Vec<usize>>,
    table_hints: Mutex<Vec<usize>>,
}

fn next_response<T: Clone>(queue: &Mutex<VecDeque<Result<T, QueryError>>>) -> Result<T, QueryError> {
    let mut queue = queue.lock().unwrap();
    if queue.len() > 1 {
        queue.pop_front().unwrap()
    } else {
        queue
            .front()
            .cloned()
            .unwrap_or_else(|| Err(QueryError::Failure("nothing scripted".into())))
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inventory(self, adapters: Vec<AdapterInfo>) -> Self {
        self.push_inventory(Ok(adapters))
    }

    pub fn push_inventory(self, response: Result<Vec<AdapterInfo>, QueryError>) -> Self {
        self.inventory.lock().unwrap().push_back(response);
        self
    }

    pub fn with_table(self, table: Vec<InterfaceSnapshot>) -> Self {
        self.push_table(Ok(table))
    }

    pub fn push_table(self, response: Result<Vec<InterfaceSnapshot>, QueryError>) -> Self {
        self.tables.lock().unwrap().push_back(response);
        self
    }

    pub fn inventory_hints(&self) -> Vec<usize> {
        self.inventory_hints.lock().unwrap().clone()
    }

    pub fn table_hints(&self) -> Vec<usize> {
        self.table_hints.lock().unwrap().clone()
    }
}

impl InterfaceSource for FakeSource {
    fn adapter_inventory(&self, size_hint: usize) -> Result<Vec<AdapterInfo>, QueryError> {
        self.inventory_hints.lock().unwrap().push(size_hint);
        next_response(&self.inventory)
    }

    fn interface_table(&self, size_hint: usize) -> Result<Vec<InterfaceSnapshot>, QueryError> {
        self.table_hints.lock().unwrap().push(size_hint);
        next_response(&self.tables)
    }
}

pub fn limits() -> QueryLimits {
    QueryLimits {
        initial_buffer_bytes: 64,
        max_buffer_bytes: 4096,
    }
}

pub fn repo(source: FakeSource) -> InterfaceRepo<FakeSource> {
    InterfaceRepo::new(source, limits())
}

pub fn adapter(name: &str, class: InterfaceClass) -> AdapterInfo {
    AdapterInfo {
        description: InterfaceIdentity::new(name),
        class,
    }
}

pub fn iface(name: &str, class: InterfaceClass, received: Counter, sent: Counter) -> InterfaceSnapshot {
    InterfaceSnapshot {
        identity: InterfaceIdentity::new(name),
        class,
        oper_state: OperationalState::Up,
        received_bytes: received,
        sent_bytes: sent,
        index: 1,
        admin_status: AdminStatus::Up,
        speed: 1_000_000_000,
    }
}

pub fn eth(name: &str, received: Counter, sent: Counter) -> InterfaceSnapshot {
    iface(name, InterfaceClass::Wired, received, sent)
}

pub fn down(mut snapshot: InterfaceSnapshot) -> InterfaceSnapshot {
    snapshot.oper_state = OperationalState::Down;
    snapshot
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    pub frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingPresenter {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}
