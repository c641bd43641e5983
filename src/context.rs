//! Checkout Context
//!
//! Cart session handle provided to the checkout components.

use std::rc::Rc;

use leptos::prelude::*;

use crate::cart::CartSession;

/// Copyable handle to the page's cart session
#[derive(Clone, Copy)]
pub struct CartContext {
    session: StoredValue<Rc<CartSession>, LocalStorage>,
}

impl CartContext {
    pub fn new(session: Rc<CartSession>) -> Self {
        Self {
            session: StoredValue::new_local(session),
        }
    }

    /// Run `f` against the session
    pub fn with_session<R>(&self, f: impl FnOnce(&CartSession) -> R) -> R {
        self.session.with_value(|session| f(session))
    }
}

pub fn use_cart_context() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}
