//! # Station Capability
//!
//! A station manufactures one product type and takes back products of that type
//! that were never handed to a client. Station implementations are supplied by the
//! embedding application; the engine only drives them through [`Station`].
//!
//! Products are opaque to the engine. Any `'static + Send + Debug` type is a
//! [`Product`], and stations check the concrete type of a returned product with
//! [`<dyn Product>::is`](Product).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::StationError;

/// A unit of output made by a station
pub trait Product: Any + Send + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + fmt::Debug> Product for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<'a> dyn Product + 'a {
    /// True if the product's concrete type is `T`
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

pub type BoxedProduct = Box<dyn Product>;

/// A production station for a single product type
///
/// `produce` is only ever called from the station's own runner thread, but
/// `accept_return` may be called concurrently from order workers, so
/// implementations must synchronize their own state.
pub trait Station: Send + Sync {
    /// Make one product. A `StationError::Failure` is permanent.
    fn produce(&self) -> Result<BoxedProduct, StationError>;

    /// Take back a product that was never delivered
    ///
    /// Fails with `StationError::InvalidProduct` if the product is not of this station's type.
    fn accept_return(&self, product: BoxedProduct) -> Result<(), StationError>;

    fn start(&self);

    fn stop(&self);
}

pub type SharedStation = Arc<dyn Station>;
