//! Form session
//!
//! A tokio task owning one [`FormController`]. Commands are processed one at a
//! time in arrival order. Schema fetches run as separate tasks and post their
//! results back into the same queue, so a late fetch can never jump ahead of a
//! command sent after it; superseded results are dropped by the controller.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::application::controller::{FormController, FormState, LoadTicket};
use crate::application::dto::{FormView, TableView};
use crate::domain::events::FormEvent;
use crate::domain::value_objects::FormSchema;
use crate::ports::inbound::{CommandOutcome, FormCommand};
use crate::{FormsError, Result};

enum Message {
    Command {
        command: FormCommand,
        reply: oneshot::Sender<Result<CommandOutcome>>,
    },
    SchemaResolved {
        ticket: LoadTicket,
        result: Result<Arc<FormSchema>>,
    },
    View(oneshot::Sender<FormView>),
    Table(oneshot::Sender<TableView>),
    Events(oneshot::Sender<Vec<FormEvent>>),
    Settled(oneshot::Sender<FormView>),
}

pub struct FormSession {
    controller: FormController,
    rx: mpsc::UnboundedReceiver<Message>,
    tx: mpsc::WeakUnboundedSender<Message>,
    settle_waiters: Vec<oneshot::Sender<FormView>>,
}

impl FormSession {
    /// Spawn the session on the current runtime.
    ///
    /// An `Idle` controller starts loading its form type right away. The task
    /// ends once every [`SessionHandle`] is dropped.
    pub fn spawn(controller: FormController) -> SessionHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = FormSession {
            controller,
            rx,
            tx: tx.downgrade(),
            settle_waiters: Vec::new(),
        };
        tokio::spawn(session.run());
        SessionHandle { tx }
    }

    async fn run(mut self) {
        if self.controller.state() == FormState::Idle {
            let form_type = self.controller.form_type().clone();
            let ticket = self.controller.begin_load(form_type);
            self.spawn_fetch(ticket);
        }

        while let Some(message) = self.rx.recv().await {
            self.handle(message);

            if self.controller.state() != FormState::Loading && !self.settle_waiters.is_empty() {
                let view = self.controller.view();
                for waiter in self.settle_waiters.drain(..) {
                    let _ = waiter.send(view.clone());
                }
            }
        }
        debug!(form_type = %self.controller.form_type(), "form session closed");
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Command { command, reply } => {
                let result = self.controller.dispatch(command);
                if let Ok(CommandOutcome::Loading(ticket)) = &result {
                    self.spawn_fetch(ticket.clone());
                }
                let _ = reply.send(result);
            }
            Message::SchemaResolved { ticket, result } => {
                // Failures are already surfaced through the notifier
                if let Err(e) = self.controller.complete_load(&ticket, result) {
                    debug!(error = %e, "schema load finished with error");
                }
            }
            Message::View(reply) => {
                let _ = reply.send(self.controller.view());
            }
            Message::Table(reply) => {
                let _ = reply.send(self.controller.table());
            }
            Message::Events(reply) => {
                let _ = reply.send(self.controller.take_events());
            }
            Message::Settled(reply) => self.settle_waiters.push(reply),
        }
    }

    fn spawn_fetch(&self, ticket: LoadTicket) {
        let Some(tx) = self.tx.upgrade() else {
            return;
        };
        let provider = self.controller.schema_provider();
        tokio::spawn(async move {
            let result = provider.get_schema(ticket.form_type()).await;
            let _ = tx.send(Message::SchemaResolved { ticket, result });
        });
    }
}

/// Cloneable sender side of a [`FormSession`]
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl SessionHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Message) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| FormsError::SessionClosed)?;
        response.await.map_err(|_| FormsError::SessionClosed)
    }

    pub async fn send(&self, command: FormCommand) -> Result<CommandOutcome> {
        self.request(|reply| Message::Command { command, reply }).await?
    }

    pub async fn view(&self) -> Result<FormView> {
        self.request(Message::View).await
    }

    pub async fn table(&self) -> Result<TableView> {
        self.request(Message::Table).await
    }

    /// Drain domain events raised so far
    pub async fn take_events(&self) -> Result<Vec<FormEvent>> {
        self.request(Message::Events).await
    }

    /// Wait until no schema load is outstanding and return the view
    pub async fn settled(&self) -> Result<FormView> {
        self.request(Message::Settled).await
    }
}
