//! Entities shared by the core unit tests.

use crate::{
    Proxy,
    model::{TypeDescriptor, TypeKind},
    traits::Recordable,
};
use std::time::Duration;

///
/// Status
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, fluentpath_derive::Recordable)]
pub enum Status {
    #[default]
    Active,
    Retired,
}

///
/// Team
///

#[derive(Debug, Default, fluentpath_derive::Recordable)]
pub struct Team {
    pub name: String,
    pub code: u32,
    pub tags: Vec<String>,
    pub lead: Option<Box<Member>>,
}

///
/// Member
///

#[derive(Debug, Default, fluentpath_derive::Recordable)]
pub struct Member {
    pub name: String,
    pub age: u32,
    pub active: bool,
    pub nickname: Option<String>,
    pub status: Status,
    pub tenure: Duration,
    pub team: Team,

    #[recordable(skip)]
    pub session_token: String,
}

///
/// Post
///

#[derive(Debug, Default, fluentpath_derive::Recordable)]
pub struct Post {
    pub title: String,
    pub author: Member,
    pub reviewer: Option<Member>,
}

///
/// Badge
/// Sealed: may end a chain, never be chained through.
///

#[derive(Debug, Default, fluentpath_derive::Recordable)]
#[recordable(sealed)]
pub struct Badge {
    pub code: u32,
}

///
/// Ledger
/// No `Default`, so no stand-in.
///

#[derive(Debug, fluentpath_derive::Recordable)]
pub struct Ledger {
    pub balance: i64,
}

///
/// Shape
/// Interface-typed property.
///

pub trait Shape {
    fn area(&self) -> f64;
}

#[derive(Debug, Default)]
pub struct Circle;

impl Shape for Circle {
    fn area(&self) -> f64 {
        0.0
    }
}

impl Recordable for Box<dyn Shape> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new("dyn Shape", TypeKind::Interface)
    }

    fn stand_in() -> Option<Self> {
        None
    }
}

pub trait ShapeAccessors {
    fn get_area(&self) -> Proxy<f64>;
}

impl ShapeAccessors for Proxy<Box<dyn Shape>> {
    fn get_area(&self) -> Proxy<f64> {
        self.accessor("get_area")
    }
}

///
/// Showcase
/// Root whose children exercise every blocked intermediate type.
///

#[derive(fluentpath_derive::Recordable)]
pub struct Showcase {
    pub label: String,
    pub shape: Box<dyn Shape>,
    pub badge: Badge,
    pub ledger: Ledger,
}

impl Default for Showcase {
    fn default() -> Self {
        Self {
            label: String::new(),
            shape: Box::new(Circle),
            badge: Badge::default(),
            ledger: Ledger { balance: 0 },
        }
    }
}

///
/// MemberShortcuts
/// Hand-written, getter-shaped extension the entity model does not know.
///

pub trait MemberShortcuts {
    fn get_team_name(&self) -> Proxy<String>;
}

impl MemberShortcuts for Proxy<Member> {
    fn get_team_name(&self) -> Proxy<String> {
        self.get_team().get_name()
    }
}

///
/// MemberDescribe
/// Declared on the stand-in, but not an accessor.
///

pub trait MemberDescribe {
    fn describe(&self) -> u8;
}

impl MemberDescribe for Proxy<Member> {
    fn describe(&self) -> u8 {
        0
    }
}
