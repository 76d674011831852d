use crate::actors::analysis_client::AnalysisClientActor;
use crate::actors::intake_session::IntakeSessionActor;
use actix::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

// Maps session ids to live session actors. Wizard state is transient process
// memory only: dropping a session here drops the actor and everything in it.
pub struct SessionRegistryActor {
    sessions: HashMap<Uuid, Addr<IntakeSessionActor>>,
    client: Addr<AnalysisClientActor>,
}

impl SessionRegistryActor {
    pub fn new(client: Addr<AnalysisClientActor>) -> Self {
        Self {
            sessions: HashMap::new(),
            client,
        }
    }
}

impl Actor for SessionRegistryActor {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "CreatedSession")]
pub struct CreateSession;

pub struct CreatedSession {
    pub id: Uuid,
    pub addr: Addr<IntakeSessionActor>,
}

#[derive(Message)]
#[rtype(result = "Option<Addr<IntakeSessionActor>>")]
pub struct GetSession(pub Uuid);

#[derive(Message)]
#[rtype(result = "bool")]
pub struct RemoveSession(pub Uuid);

impl Handler<CreateSession> for SessionRegistryActor {
    type Result = MessageResult<CreateSession>;

    fn handle(&mut self, _msg: CreateSession, _ctx: &mut Context<Self>) -> Self::Result {
        let id = Uuid::new_v4();
        let addr = IntakeSessionActor::new(self.client.clone()).start();
        self.sessions.insert(id, addr.clone());
        log::debug!("Intake session {} created ({} live).", id, self.sessions.len());
        MessageResult(CreatedSession { id, addr })
    }
}

impl Handler<GetSession> for SessionRegistryActor {
    type Result = MessageResult<GetSession>;

    fn handle(&mut self, msg: GetSession, _ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.sessions.get(&msg.0).cloned())
    }
}

impl Handler<RemoveSession> for SessionRegistryActor {
    type Result = MessageResult<RemoveSession>;

    fn handle(&mut self, msg: RemoveSession, _ctx: &mut Context<Self>) -> Self::Result {
        let removed = self.sessions.remove(&msg.0).is_some();
        if removed {
            log::debug!("Intake session {} discarded.", msg.0);
        }
        MessageResult(removed)
    }
}
