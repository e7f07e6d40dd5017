// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::codec::{object_via_codec, Codec};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

// microseconds since the Unix epoch, as i64
impl Codec for NaiveDateTime {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        let micros = self.and_utc().timestamp_micros();
        s.write(&micros.to_ne_bytes())
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let micros = i64::read(d)?;
        DateTime::<Utc>::from_timestamp_micros(micros)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| Error::invalid_data(format!("timestamp {} out of range", micros)))
    }

    crate::shared_object_views!();
}

// days since 0001-01-01 (CE day 1), as i32
impl Codec for NaiveDate {
    fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
        s.write(&self.num_days_from_ce().to_ne_bytes())
    }

    fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
        let days = i32::read(d)?;
        NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or_else(|| Error::invalid_data(format!("date {} out of range", days)))
    }

    crate::shared_object_views!();
}

object_via_codec!(NaiveDateTime, NaiveDate);
