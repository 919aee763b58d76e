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

//! Closed sets of wire values accepted by the logistics API.

use std::fmt;
use std::str::FromStr;

use ecpay_logistics_core::Error;
use ecpay_logistics_core::Value;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            /// Human readable description.
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    v => Err(Error::invalid_field($field, format!("unknown value {v:?}"))),
                }
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Self {
                Value::from(v.as_str())
            }
        }
    };
}

wire_enum! {
    /// Top level logistics type (`LogisticsType`).
    LogisticsType, "LogisticsType" {
        /// Convenience store pickup.
        Cvs => "CVS", "Convenience store pickup";
        /// Home delivery.
        Home => "Home", "Home delivery";
    }
}

wire_enum! {
    /// Carrier and business mode (`LogisticsSubType`).
    LogisticsSubType, "LogisticsSubType" {
        /// 7-ELEVEN, business to consumer.
        Unimart => "UNIMART", "7-ELEVEN (B2C)";
        /// FamilyMart, business to consumer.
        Fami => "FAMI", "FamilyMart (B2C)";
        /// Hi-Life, business to consumer.
        Hilife => "HILIFE", "Hi-Life (B2C)";
        /// 7-ELEVEN frozen pickup, business to consumer.
        UnimartFreeze => "UNIMARTFREEZE", "7-ELEVEN frozen pickup (B2C)";
        /// 7-ELEVEN, consumer to consumer.
        UnimartC2c => "UNIMARTC2C", "7-ELEVEN (C2C)";
        /// FamilyMart, consumer to consumer.
        FamiC2c => "FAMIC2C", "FamilyMart (C2C)";
        /// Hi-Life, consumer to consumer.
        HilifeC2c => "HILIFEC2C", "Hi-Life (C2C)";
        /// OK Mart, consumer to consumer.
        OkmartC2c => "OKMARTC2C", "OK Mart (C2C)";
        /// T-CAT home delivery.
        Tcat => "TCAT", "T-CAT home delivery";
        /// Chunghwa Post home delivery.
        Post => "POST", "Chunghwa Post";
    }
}

impl LogisticsSubType {
    /// Consumer to consumer store pickup.
    pub fn is_c2c(&self) -> bool {
        matches!(
            self,
            Self::UnimartC2c | Self::FamiC2c | Self::HilifeC2c | Self::OkmartC2c
        )
    }

    /// Business to consumer store pickup.
    pub fn is_b2c(&self) -> bool {
        matches!(
            self,
            Self::Unimart | Self::Fami | Self::Hilife | Self::UnimartFreeze
        )
    }

    /// Any store pickup sub type.
    pub fn is_cvs(&self) -> bool {
        !self.is_home()
    }

    /// Any home delivery sub type.
    pub fn is_home(&self) -> bool {
        matches!(self, Self::Tcat | Self::Post)
    }

    /// The [`LogisticsType`] this sub type belongs to.
    pub fn logistics_type(&self) -> LogisticsType {
        if self.is_home() {
            LogisticsType::Home
        } else {
            LogisticsType::Cvs
        }
    }
}

wire_enum! {
    /// Whether the store collects payment on pickup (`IsCollection`).
    IsCollection, "IsCollection" {
        /// No cash on delivery.
        No => "N", "No collection";
        /// Cash on delivery.
        Yes => "Y", "Collect on delivery";
    }
}

impl IsCollection {
    /// Returns true for cash on delivery.
    pub fn is_collection(&self) -> bool {
        *self == Self::Yes
    }
}

/// Store map layout (`Device`), sent as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    /// Desktop layout.
    Pc,
    /// Mobile layout.
    Mobile,
}

impl Device {
    /// Every value, in declaration order.
    pub const ALL: &'static [Device] = &[Device::Pc, Device::Mobile];

    /// The integer sent on the wire.
    pub fn as_int(&self) -> i64 {
        match self {
            Device::Pc => 0,
            Device::Mobile => 1,
        }
    }

    /// Human readable description.
    pub fn label(&self) -> &'static str {
        match self {
            Device::Pc => "Desktop",
            Device::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

impl FromStr for Device {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Device::Pc),
            "1" => Ok(Device::Mobile),
            v => Err(Error::invalid_field(
                "Device",
                format!("unknown value {v:?}"),
            )),
        }
    }
}

impl From<Device> for Value {
    fn from(v: Device) -> Self {
        Value::Int(v.as_int())
    }
}

wire_enum! {
    /// Home delivery distance (`Distance`).
    Distance, "Distance" {
        /// Same city.
        Same => "00", "Same city";
        /// Another city.
        Other => "01", "Other city";
        /// Outlying island.
        Island => "02", "Outlying island";
    }
}

wire_enum! {
    /// Home delivery temperature (`Temperature`).
    Temperature, "Temperature" {
        /// Room temperature.
        Room => "0001", "Room temperature";
        /// Refrigerated.
        Refrigeration => "0002", "Refrigerated";
        /// Frozen.
        Freeze => "0003", "Frozen";
    }
}

wire_enum! {
    /// Home delivery parcel size (`Specification`).
    Specification, "Specification" {
        /// Up to 60 cm.
        Size60 => "0001", "60cm";
        /// Up to 90 cm.
        Size90 => "0002", "90cm";
        /// Up to 120 cm.
        Size120 => "0003", "120cm";
        /// Up to 150 cm.
        Size150 => "0004", "150cm";
    }
}

impl Specification {
    /// Maximum summed parcel dimensions in centimetres.
    pub fn max_size_cm(&self) -> u32 {
        match self {
            Self::Size60 => 60,
            Self::Size90 => 90,
            Self::Size120 => 120,
            Self::Size150 => 150,
        }
    }
}

wire_enum! {
    /// Pickup window at the sender (`ScheduledPickupTime`).
    ScheduledPickupTime, "ScheduledPickupTime" {
        /// 09:00 to 12:00.
        Morning => "1", "09:00 to 12:00";
        /// 12:00 to 17:00.
        Afternoon => "2", "12:00 to 17:00";
        /// 17:00 to 20:00.
        Evening => "3", "17:00 to 20:00";
        /// No preference.
        Unlimited => "4", "Any time";
    }
}

wire_enum! {
    /// Delivery window at the receiver (`ScheduledDeliveryTime`).
    ScheduledDeliveryTime, "ScheduledDeliveryTime" {
        /// Before 13:00.
        Before13 => "1", "Before 13:00";
        /// 14:00 to 18:00.
        Between14And18 => "2", "14:00 to 18:00";
        /// No preference.
        Unlimited => "4", "Any time";
    }
}

wire_enum! {
    /// Which stores a store list query returns (`StoreType`).
    StoreType, "StoreType" {
        /// Pickup stores only.
        PickupOnly => "01", "Pickup only";
        /// Stores accepting both pickup and returns.
        PickupAndReturn => "02", "Pickup and return";
        /// Return stores only.
        ReturnOnly => "03", "Return only";
    }
}
