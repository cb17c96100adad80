// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod users;
pub mod dashboard;
pub mod funds;
pub mod transactions;
pub mod sips;
pub mod doctor;
