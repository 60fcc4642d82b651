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

pub mod handler;
pub mod jsonpath;
pub mod manifest;
pub mod wait;

pub use self::handler::ResourceEngine;
pub use self::jsonpath::JsonPath;
pub use self::manifest::{prepare_record, render_manifest, render_manifest_json, render_manifest_yaml};
pub use self::wait::{poll_until, PollSettings, Probe};
