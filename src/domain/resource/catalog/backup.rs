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

use super::common::{bucket_secret, hazelcast_resource_name};
use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::schema::Attribute;

fn hot_backup_spec() -> Vec<Attribute> {
    let mut spec = vec![hazelcast_resource_name()];
    spec.extend(bucket_secret());
    spec
}

pub fn hot_backup() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("HotBackup", "hotbackups")
        .with_description("HotBackup is the Schema for the hot backup API")
        .with_spec(hot_backup_spec())
}

pub fn cron_hot_backup() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("CronHotBackup", "cronhotbackups")
        .with_description("CronHotBackup is the Schema for the cronhotbackups API")
        .with_spec(vec![
            Attribute::string("schedule")
                .required()
                .non_empty()
                .describe("Schedule contains a crontab-like expression that defines the schedule in which HotBackup will be started."),
            Attribute::object(
                "hot_backup_template",
                vec![
                    Attribute::dynamic("metadata"),
                    Attribute::object("spec", hot_backup_spec()).required(),
                ],
            )
            .required(),
            Attribute::int64("successful_hot_backups_history_limit")
                .at_least(0)
                .default_value(5),
            Attribute::int64("failed_hot_backups_history_limit")
                .at_least(0)
                .default_value(3),
            Attribute::bool("suspend")
                .default_value(false)
                .describe("When true, CronHotBackup will stop creating HotBackup CRs until it is disabled"),
        ])
}
