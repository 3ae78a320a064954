// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Duplex channel interception.
//!
//! `MirroredChannel` decorates an existing channel: every received or sent
//! value is encoded and copied to the sink around the original operation,
//! whose call/return contract is preserved exactly. Errors from the wrapped
//! channel propagate untouched; errors on the mirroring path never reach
//! the caller.
//!
//! Interception is composed into the transport's channel factory once at
//! startup. Channels that already mirror are passed through, so composing
//! the factory a second time never double-mirrors.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::mirror::encoder::encode;
use crate::mirror::envelope::{Direction, Envelope};
use crate::mirror::sink::MirrorSink;

/// A duplex message channel: one receive side, one send side.
///
/// `send` is the asynchronous variant; `write` is the synchronous one for
/// transports that flush inline. Implementations provide whichever their
/// transport supports; the default `write` rejects the call.
#[async_trait]
pub trait MessageChannel: Send {
    /// Receive the next inbound value. `None` means the channel closed.
    async fn receive(&mut self) -> Result<Option<Envelope>>;

    /// Send one value, awaiting completion.
    async fn send(&mut self, envelope: Envelope) -> Result<()>;

    /// Synchronous send variant.
    fn write(&mut self, envelope: Envelope) -> Result<()> {
        let _ = envelope;
        Err(anyhow::anyhow!("channel does not support synchronous writes"))
    }

    /// Whether this channel already mirrors its traffic.
    fn mirrored(&self) -> bool {
        false
    }
}

#[async_trait]
impl<C: MessageChannel + ?Sized> MessageChannel for Box<C> {
    async fn receive(&mut self) -> Result<Option<Envelope>> {
        (**self).receive().await
    }

    async fn send(&mut self, envelope: Envelope) -> Result<()> {
        (**self).send(envelope).await
    }

    fn write(&mut self, envelope: Envelope) -> Result<()> {
        (**self).write(envelope)
    }

    fn mirrored(&self) -> bool {
        (**self).mirrored()
    }
}

/// Decorator mirroring all traffic of an inner channel to a shared sink.
pub struct MirroredChannel<C> {
    inner: C,
    sink: Arc<MirrorSink>,
}

impl<C> MirroredChannel<C> {
    pub fn new(inner: C, sink: Arc<MirrorSink>) -> Self {
        Self { inner, sink }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn mirror(&self, direction: Direction, envelope: &Envelope) {
        // Empty frames are heartbeat noise, never mirrored.
        if envelope.is_empty() {
            return;
        }
        self.sink.send(&encode(direction, envelope));
    }
}

#[async_trait]
impl<C: MessageChannel> MessageChannel for MirroredChannel<C> {
    /// Delegate first (the suspension point), then mirror the value that
    /// arrived and hand it back unchanged.
    async fn receive(&mut self) -> Result<Option<Envelope>> {
        let received = self.inner.receive().await?;
        if let Some(envelope) = &received {
            self.mirror(Direction::Input, envelope);
        }
        Ok(received)
    }

    /// Mirror before delegating, then return the delegate's result.
    async fn send(&mut self, envelope: Envelope) -> Result<()> {
        self.mirror(Direction::Output, &envelope);
        self.inner.send(envelope).await
    }

    fn write(&mut self, envelope: Envelope) -> Result<()> {
        self.mirror(Direction::Output, &envelope);
        self.inner.write(envelope)
    }

    fn mirrored(&self) -> bool {
        true
    }
}

pub type BoxedChannel = Box<dyn MessageChannel>;

/// A capability that constructs one channel per session.
pub type ChannelFactory = Arc<dyn Fn() -> BoxedChannel + Send + Sync>;

/// Compose mirroring into a channel factory.
///
/// Install once at startup in place of the transport's own factory; every
/// session it creates then gains interception with no call-site changes.
/// Already-mirrored channels are returned untouched, so repeated
/// composition has no further effect.
pub fn mirror_factory(factory: ChannelFactory, sink: Arc<MirrorSink>) -> ChannelFactory {
    Arc::new(move || {
        let channel = factory();
        if channel.mirrored() {
            channel
        } else {
            Box::new(MirroredChannel::new(channel, Arc::clone(&sink)))
        }
    })
}
