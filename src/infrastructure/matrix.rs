//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` and `Destinations` traits for the Matrix protocol using the `matrix_sdk`.
//! Binding destinations are room ids; a room is postable when the bot has joined it.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use matrix_sdk::config::SyncSettings;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::RoomId;
use matrix_sdk::ruma::events::MessageLikeEventType;
use matrix_sdk::ruma::events::room::member::{MembershipState, StrippedRoomMemberEvent};
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use matrix_sdk::{Client, RoomState};

use crate::domain::config::MatrixConfig;
use crate::domain::errors::{DeliveryError, ResolveError};
use crate::domain::traits::{ChatProvider, Destinations};
use crate::strings::logs;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_notification(&self, content: &str) -> Result<(), DeliveryError> {
        tracing::debug!("Bot sending notification to {}", self.room_id());
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }
}

/// Resolves binding destinations against the rooms known to a logged-in client.
#[derive(Clone)]
pub struct MatrixDestinations {
    client: Client,
}

impl MatrixDestinations {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Destinations for MatrixDestinations {
    async fn resolve(&self, destination_id: &str) -> Result<Arc<dyn ChatProvider>, ResolveError> {
        let not_found = || ResolveError::NotFound(destination_id.to_string());

        let room_id = RoomId::parse(destination_id).map_err(|_| not_found())?;
        let room = self.client.get_room(&room_id).ok_or_else(not_found)?;

        let may_post = match self.client.user_id() {
            Some(me) => room
                .power_levels()
                .await
                .map(|levels| levels.user_can_send_message(me, MessageLikeEventType::RoomMessage))
                .unwrap_or_else(|e| {
                    tracing::warn!(room = %destination_id, error = %e, "power level lookup failed");
                    false
                }),
            None => false,
        };
        postability(destination_id, room.is_space(), room.state(), may_post)?;

        Ok(Arc::new(MatrixService::new(room)))
    }
}

/// A destination must be a joined, non-space room the bot may post messages in.
fn postability(
    destination_id: &str,
    is_space: bool,
    state: RoomState,
    may_post: bool,
) -> Result<(), ResolveError> {
    if is_space {
        return Err(ResolveError::WrongKind(destination_id.to_string()));
    }
    if !matches!(state, RoomState::Joined) || !may_post {
        return Err(ResolveError::NotPostable(destination_id.to_string()));
    }
    Ok(())
}

/// Logs in, accepts future invites and runs one sync so joined rooms resolve.
pub async fn connect(config: &MatrixConfig) -> Result<Client> {
    let client = Client::builder()
        .homeserver_url(&config.homeserver)
        .build()
        .await
        .context("Failed to build Matrix client")?;

    client
        .matrix_auth()
        .login_username(&config.username, &config.password)
        .send()
        .await
        .context("Matrix login failed")?;
    tracing::info!("{}", logs::LOGIN_SUCCESS);

    if let Some(name) = &config.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name)).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            match room.join().await {
                Ok(_) => tracing::info!("{}", logs::JOIN_INVITE_SUCCESS),
                Err(e) => tracing::warn!("{}", logs::join_invite_fail(&e.to_string())),
            }
        }
    });

    tracing::info!("{}", logs::INITIAL_SYNC);
    client
        .sync_once(SyncSettings::default())
        .await
        .context("Initial Matrix sync failed")?;

    Ok(client)
}
