// Copyright 2025 JiangLong.
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

//! Declarative schema: attribute trees, validators and wire conversion.

pub mod attribute;
pub mod convert;
pub mod validator;

pub use self::attribute::{snake_to_camel, Attribute, AttributeType, Presence};
pub use self::convert::{apply_defaults, from_wire, to_wire};
pub use self::validator::{validate_object, Validator};
