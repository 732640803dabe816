//! Sprite loading.
//!
//! Sprites are fetched on a background thread and handed back over a
//! channel; the game loop polls until every one has arrived and only then
//! starts ticking.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, error};

use crate::error::ResourceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sprite {
    StoneBlock,
    WaterBlock,
    GrassBlock,
    Rock,
    Key,
    EnemyBug,
    CharCatGirl,
}

impl Sprite {
    /// Everything the game draws.
    pub const ALL: [Sprite; 7] = [
        Sprite::StoneBlock,
        Sprite::WaterBlock,
        Sprite::GrassBlock,
        Sprite::Rock,
        Sprite::Key,
        Sprite::EnemyBug,
        Sprite::CharCatGirl,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
            Sprite::Rock => "images/Rock.png",
            Sprite::Key => "images/Key.png",
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::CharCatGirl => "images/char-cat-girl.png",
        }
    }
}

/// Produces drawable handles for sprites.  Runs on the loader thread.
pub trait SpriteSource: Send + 'static {
    type Handle: Send + 'static;

    fn fetch(&mut self, sprite: Sprite) -> Result<Self::Handle, ResourceError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready,
}

type Delivery<H> = Result<(Sprite, H), ResourceError>;

/// Loaded sprite handles, keyed by sprite.
pub struct Resources<H> {
    cache: HashMap<Sprite, H>,
    expected: usize,
    incoming: Option<Receiver<Delivery<H>>>,
}

impl<H: Send + 'static> Resources<H> {
    /// Start loading `sprites` from `source` in the background.
    pub fn load<S>(sprites: &[Sprite], mut source: S) -> Self
    where
        S: SpriteSource<Handle = H>,
    {
        let mut wanted = sprites.to_vec();
        wanted.sort();
        wanted.dedup();
        let expected = wanted.len();
        debug!(count = expected, "loading sprites");

        let (tx, rx) = mpsc::channel::<Delivery<H>>();
        thread::spawn(move || {
            for sprite in wanted {
                let delivery = source.fetch(sprite).map(|handle| (sprite, handle));
                let failed = delivery.is_err();
                if tx.send(delivery).is_err() || failed {
                    break; // receiver dropped, or nothing more worth loading
                }
            }
        });

        Self {
            cache: HashMap::new(),
            expected,
            incoming: Some(rx),
        }
    }

    /// Collect whatever the loader has finished so far (non-blocking).
    pub fn poll(&mut self) -> Result<LoadStatus, ResourceError> {
        if let Some(rx) = &self.incoming {
            loop {
                match rx.try_recv() {
                    Ok(Ok((sprite, handle))) => {
                        self.cache.insert(sprite, handle);
                    }
                    Ok(Err(err)) => {
                        error!(%err, "sprite loading failed");
                        return Err(err);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if self.cache.len() < self.expected {
                            return Err(ResourceError::Disconnected);
                        }
                        break;
                    }
                }
            }
        }

        if self.is_ready() {
            self.incoming = None;
            Ok(LoadStatus::Ready)
        } else {
            Ok(LoadStatus::Pending)
        }
    }

    /// Block until every sprite has arrived.
    pub fn wait(&mut self) -> Result<(), ResourceError> {
        while !self.is_ready() {
            let rx = self.incoming.as_ref().ok_or(ResourceError::Disconnected)?;
            let (sprite, handle) = rx.recv().map_err(|_| ResourceError::Disconnected)??;
            self.cache.insert(sprite, handle);
        }
        self.incoming = None;
        Ok(())
    }
}

impl<H> Resources<H> {
    pub fn is_ready(&self) -> bool {
        self.cache.len() >= self.expected
    }

    /// Look up a loaded sprite.  Fails until every sprite has arrived.
    pub fn get(&self, sprite: Sprite) -> Result<&H, ResourceError> {
        if !self.is_ready() {
            return Err(ResourceError::NotLoaded(sprite.path()));
        }
        self.cache
            .get(&sprite)
            .ok_or(ResourceError::NotLoaded(sprite.path()))
    }
}
