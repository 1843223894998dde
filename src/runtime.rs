//! Runtime: owns the model, runs updates and performs their side effects
//!
//! Everything runs to completion on the calling thread. Messages produced by
//! commands (file loaded, export finished) are queued and handled before
//! `dispatch` returns. Persistence is fire-and-forget: a failed save is logged
//! and never surfaces to the caller.

use std::collections::VecDeque;

use crate::commands::{Cmd, Notice};
use crate::config::AppConfig;
use crate::messages::{AppMsg, Msg};
use crate::model::TableModel;
use crate::persistence::{KeyValueStore, PersistenceGateway};
use crate::update::update;

type Observer = Box<dyn FnMut(&TableModel)>;

/// The application root: state container, persistence and observers
pub struct Runtime<S: KeyValueStore> {
    model: TableModel,
    gateway: PersistenceGateway<S>,
    observers: Vec<Observer>,
    queue: VecDeque<Msg>,
}

impl<S: KeyValueStore> Runtime<S> {
    /// Build a runtime, restoring the last snapshot or seeding a fresh table
    pub fn start(config: &AppConfig, store: S) -> Self {
        let gateway = PersistenceGateway::new(store);
        let mut model = TableModel::from_config(config);
        if gateway.restore_into(&mut model) {
            tracing::info!(rows = model.store.len(), "restored table from snapshot");
        } else {
            tracing::info!("starting from seed data");
        }

        Self {
            model,
            gateway,
            observers: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    pub fn model(&self) -> &TableModel {
        &self.model
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    /// Register a callback invoked with the model after every handled message
    pub fn subscribe(&mut self, observer: impl FnMut(&TableModel) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Handle a message and everything it triggers
    ///
    /// Returns the notices produced along the way.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Notice> {
        let mut notices = Vec::new();
        self.queue.push_back(msg);

        while let Some(msg) = self.queue.pop_front() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd, &mut notices);
            }
            for observer in &mut self.observers {
                observer(&self.model);
            }
        }

        notices
    }

    /// Write the current state now
    pub fn persist(&mut self) {
        if let Err(e) = self.gateway.save(&self.model) {
            tracing::warn!("Failed to save snapshot: {}", e);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd, notices: &mut Vec<Notice>) {
        match cmd {
            Cmd::None => {}
            Cmd::Persist => self.persist(),
            Cmd::LoadFile { path } => {
                let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                self.queue
                    .push_back(Msg::App(AppMsg::FileLoaded { path, result }));
            }
            Cmd::SaveFile { path, content } => {
                let result = std::fs::write(&path, content).map_err(|e| e.to_string());
                self.queue
                    .push_back(Msg::App(AppMsg::ExportCompleted { path, result }));
            }
            Cmd::Notify(notice) => {
                if notice.is_error() {
                    tracing::warn!("{}", notice);
                } else {
                    tracing::info!("{}", notice);
                }
                notices.push(notice);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, notices);
                }
            }
        }
    }
}
