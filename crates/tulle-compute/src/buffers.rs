//! Kinematic state buffers and renderer-shared buffer access.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use glam::{Vec3, Vec4};
use tulle_types::{TulleError, TulleResult};

/// One full set of per-node kinematic state.
///
/// Positions are homogeneous (`w` is carried through untouched) so the
/// position buffer can be handed to a renderer as float4 data.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBuffers {
    /// Node positions.
    pub position: Vec<Vec4>,
    /// Node velocities.
    pub velocity: Vec<Vec3>,
    /// Node accelerations.
    pub acceleration: Vec<Vec3>,
}

/// Mutable view of a single node's state inside a [`KinematicBuffers`].
pub struct NodeSlot<'a> {
    pub position: &'a mut Vec4,
    pub velocity: &'a mut Vec3,
    pub acceleration: &'a mut Vec3,
}

impl KinematicBuffers {
    /// Creates buffers for `len` nodes at the origin.
    pub fn zeros(len: usize) -> Self {
        Self {
            position: vec![Vec4::W; len],
            velocity: vec![Vec3::ZERO; len],
            acceleration: vec![Vec3::ZERO; len],
        }
    }

    /// Creates buffers at the given positions with zero velocity and acceleration.
    pub fn at_rest(position: Vec<Vec4>) -> Self {
        let len = position.len();
        Self {
            position,
            velocity: vec![Vec3::ZERO; len],
            acceleration: vec![Vec3::ZERO; len],
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.position.len()
    }

    /// Returns true if the buffers hold no nodes.
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Returns the `xyz` part of node `i`'s position.
    #[inline]
    pub fn position3(&self, i: usize) -> Vec3 {
        self.position[i].truncate()
    }

    /// Returns `(position, velocity, acceleration)` of node `i`.
    #[inline]
    pub fn node(&self, i: usize) -> (Vec4, Vec3, Vec3) {
        (self.position[i], self.velocity[i], self.acceleration[i])
    }

    /// Checks that the three channels have the same length.
    pub fn validate(&self) -> TulleResult<()> {
        let n = self.position.len();
        if self.velocity.len() != n || self.acceleration.len() != n {
            return Err(TulleError::Compute(format!(
                "Kinematic channel lengths differ: position {}, velocity {}, acceleration {}",
                n,
                self.velocity.len(),
                self.acceleration.len()
            )));
        }
        Ok(())
    }

    /// Overwrites every channel with the contents of `other`.
    pub fn copy_from(&mut self, other: &KinematicBuffers) -> TulleResult<()> {
        if other.len() != self.len() {
            return Err(TulleError::Compute(format!(
                "Cannot copy {} nodes into buffers of {}",
                other.len(),
                self.len()
            )));
        }
        self.position.copy_from_slice(&other.position);
        self.velocity.copy_from_slice(&other.velocity);
        self.acceleration.copy_from_slice(&other.acceleration);
        Ok(())
    }

    /// Returns one mutable slot per node, in node order.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = NodeSlot<'_>> {
        self.position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(self.acceleration.iter_mut())
            .map(|((position, velocity), acceleration)| NodeSlot {
                position,
                velocity,
                acceleration,
            })
    }
}

/// A named buffer shared between the compute side and a renderer.
///
/// The compute side must [`acquire`](SharedBuffer::acquire) the buffer
/// before mutating it; the returned guard releases it when dropped, on
/// every exit path. The renderer reads through [`read`](SharedBuffer::read)
/// and cannot observe the buffer while it is acquired.
#[derive(Debug)]
pub struct SharedBuffer<T> {
    name: String,
    data: Arc<RwLock<T>>,
}

impl<T> Clone for SharedBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> SharedBuffer<T> {
    /// Wraps `data` under the given attribute name.
    pub fn new(name: impl Into<String>, data: T) -> Self {
        Self {
            name: name.into(),
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Returns the buffer's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquires exclusive access for mutation.
    pub fn acquire(&self) -> TulleResult<RwLockWriteGuard<'_, T>> {
        self.data
            .write()
            .map_err(|_| TulleError::BufferAcquire(self.name.clone()))
    }

    /// Acquires shared read access.
    pub fn read(&self) -> TulleResult<RwLockReadGuard<'_, T>> {
        self.data
            .read()
            .map_err(|_| TulleError::BufferAcquire(self.name.clone()))
    }

    /// Replaces the buffer contents.
    pub fn write_all(&self, value: T) -> TulleResult<()> {
        *self.acquire()? = value;
        Ok(())
    }
}

impl<T: Clone> SharedBuffer<T> {
    /// Returns a copy of the current contents.
    pub fn snapshot(&self) -> TulleResult<T> {
        Ok(self.read()?.clone())
    }
}
