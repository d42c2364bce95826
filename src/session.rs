//! `Idle -> AwaitingResponse -> RenderingSuccess | RenderingFallback`. No
//! client-side timeout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comparison::ComparisonSet;
use crate::mock;
use crate::models::GenerateProductsRequest;
use crate::normalize::{normalize_reply, Card, NormalizedReply};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
  Idle,
  AwaitingResponse,
  RenderingSuccess,
  RenderingFallback,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserMessage {
  pub id: String,
  pub text: String,
  pub sent_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AssistantTurn {
  pub id: String,
  #[serde(flatten)]
  pub reply: NormalizedReply,
  pub received_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
  User(UserMessage),
  Assistant(AssistantTurn),
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
  #[error("message is empty")]
  EmptyInput,

  #[error("a request is already in flight")]
  RequestInFlight,

  #[error("no request is in flight")]
  NotAwaiting,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
  messages: Vec<ChatMessage>,
  state: SessionState,
  comparison: ComparisonSet,
  pending_compare: Option<Vec<Card>>,
}

impl Default for ChatSession {
  fn default() -> Self {
    Self {
      messages: Vec::new(),
      state: SessionState::Idle,
      comparison: ComparisonSet::new(),
      pending_compare: None,
    }
  }
}

impl ChatSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> SessionState {
    self.state
  }

  pub fn messages(&self) -> &[ChatMessage] {
    &self.messages
  }

  pub fn comparison(&self) -> &ComparisonSet {
    &self.comparison
  }

  pub fn comparison_mut(&mut self) -> &mut ComparisonSet {
    &mut self.comparison
  }

  pub fn can_send(&self, input: &str) -> bool {
    self.state != SessionState::AwaitingResponse && !input.trim().is_empty()
  }

  /// Records the user's message, applies any compare-tray command in it and
  /// returns the request body to post.
  pub fn send(&mut self, input: &str) -> Result<GenerateProductsRequest, SessionError> {
    if self.state == SessionState::AwaitingResponse {
      return Err(SessionError::RequestInFlight);
    }
    let text = input.trim();
    if text.is_empty() {
      return Err(SessionError::EmptyInput);
    }

    self.messages.push(ChatMessage::User(UserMessage {
      id: uuid::Uuid::new_v4().to_string(),
      text: text.to_string(),
      sent_at: Utc::now(),
    }));
    self.state = SessionState::AwaitingResponse;
    self.apply_tray_command(text);

    Ok(GenerateProductsRequest {
      query: Some(text.to_string()),
    })
  }

  /// Settles the in-flight request with the response body.
  pub fn settle(&mut self, body: &serde_json::Value) -> Result<AssistantTurn, SessionError> {
    if self.state != SessionState::AwaitingResponse {
      return Err(SessionError::NotAwaiting);
    }
    Ok(self.push_reply(normalize_reply(body)))
  }

  /// Settles the in-flight request when it failed outright, e.g. a network
  /// error or a non-200 status.
  pub fn fail(&mut self, message: &str) -> Result<AssistantTurn, SessionError> {
    if self.state != SessionState::AwaitingResponse {
      return Err(SessionError::NotAwaiting);
    }
    let reply = NormalizedReply {
      title: None,
      description: None,
      text: message.to_string(),
      cards: Vec::new(),
      comparison: None,
      proactive_tip: None,
      success: false,
    };
    Ok(self.push_reply(reply))
  }

  /// "add <TV> to comparison", "remove <TV> from comparison", or "compare"
  /// once the tray holds two cards. The compare view is attached to the next
  /// assistant turn.
  fn apply_tray_command(&mut self, text: &str) {
    let lower = text.to_lowercase();
    if lower.contains("add") && lower.contains("comparison") {
      if let Some(tv) = mock::named_card(text) {
        if let Err(err) = self.comparison.add(tv.to_card()) {
          tracing::debug!(error = %err, tv = %tv.name, "tray add ignored");
        }
      }
    } else if lower.contains("remove") && lower.contains("comparison") {
      if let Some(tv) = mock::named_card(text) {
        let ids: Vec<String> = self
          .comparison
          .cards()
          .iter()
          .filter(|c| c.product.tv_type.eq_ignore_ascii_case(&tv.name))
          .map(|c| c.id.clone())
          .collect();
        for id in ids {
          self.comparison.remove(&id);
        }
      }
    } else if lower.contains("compare") && self.comparison.can_compare() {
      self.pending_compare = Some(self.comparison.cards().to_vec());
    }
  }

  fn push_reply(&mut self, mut reply: NormalizedReply) -> AssistantTurn {
    if let Some(cards) = self.pending_compare.take() {
      reply.comparison = Some(cards);
    }
    self.state = if reply.success {
      SessionState::RenderingSuccess
    } else {
      SessionState::RenderingFallback
    };
    let turn = AssistantTurn {
      id: uuid::Uuid::new_v4().to_string(),
      reply,
      received_at: Utc::now(),
    };
    self.messages.push(ChatMessage::Assistant(turn.clone()));
    turn
  }

  /// Looks up a rendered card by id across all assistant turns.
  pub fn find_card(&self, id: &str) -> Option<&Card> {
    self.messages.iter().rev().find_map(|m| match m {
      ChatMessage::Assistant(turn) => turn.reply.cards.iter().find(|c| c.id == id),
      ChatMessage::User(_) => None,
    })
  }
}
