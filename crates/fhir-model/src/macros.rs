/// Declare a FHIR structure with field introspection.
///
/// ```ignore
/// fhir_element! {
///     Coding {
///         system: Option<String> => "system",
///         code: Option<String> => "code",
///     }
/// }
/// ```
///
/// Generates the serializable struct, a `FIELDS` table, and the
/// `Element`, `Field`, and `ObjectSlot` impls for the type and its
/// `Option`. `Name decoded_by some_fn { .. }` installs a literal decoder
/// with signature `fn(&mut Name, &str) -> Result<(), DecodeError>`.
macro_rules! fhir_element {
    (
        $(#[$meta:meta])*
        $name:ident $(decoded_by $decoder:path)? {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty => $json:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $json)]
                pub $field: $ty,
            )*
        }

        impl $name {
            /// Field descriptors in declaration order.
            pub const FIELDS: &'static [$crate::element::FieldInfo] = &[
                $(
                    $crate::element::FieldInfo::new(
                        $json,
                        <$ty as $crate::element::Field>::KIND,
                    ),
                )*
            ];
        }

        impl $crate::element::Element for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            fn field_infos(&self) -> &'static [$crate::element::FieldInfo] {
                Self::FIELDS
            }

            fn field_mut(&mut self, name: &str) -> Option<$crate::element::Slot<'_>> {
                match name {
                    $($json => Some($crate::element::Field::slot(&mut self.$field)),)*
                    _ => None,
                }
            }

            fn field(&self, name: &str) -> Option<$crate::element::FieldValue<'_>> {
                match name {
                    $($json => Some($crate::element::Field::value(&self.$field)),)*
                    _ => None,
                }
            }

            $(
                fn decode_literal(
                    &mut self,
                    literal: &str,
                ) -> Option<Result<(), $crate::error::DecodeError>> {
                    Some($decoder(self, literal))
                }
            )?
        }

        impl $crate::element::Field for $name {
            const KIND: $crate::element::FieldKind = $crate::element::FieldKind::Value(
                $crate::element::ValueKind::Object(stringify!($name)),
            );

            fn slot(&mut self) -> $crate::element::Slot<'_> {
                $crate::element::Slot::Object(self)
            }

            fn value(&self) -> $crate::element::FieldValue<'_> {
                $crate::element::FieldValue::Object(Some(self as &dyn $crate::element::Element))
            }
        }

        impl $crate::element::Field for Option<$name> {
            const KIND: $crate::element::FieldKind = $crate::element::FieldKind::Optional(
                $crate::element::ValueKind::Object(stringify!($name)),
            );

            fn slot(&mut self) -> $crate::element::Slot<'_> {
                $crate::element::Slot::Object(self)
            }

            fn value(&self) -> $crate::element::FieldValue<'_> {
                $crate::element::FieldValue::Object(
                    self.as_ref()
                        .map(|item| item as &dyn $crate::element::Element),
                )
            }
        }

        impl $crate::element::ObjectSlot for $name {
            fn object_type(&self) -> &'static str {
                stringify!($name)
            }

            fn allocate(&mut self) -> &mut dyn $crate::element::Element {
                self
            }

            fn decode_literal(
                &mut self,
                literal: &str,
            ) -> Option<Result<(), $crate::error::DecodeError>> {
                let decoded = $crate::element::decode_merged(Some(&*self), literal)?;
                Some(decoded.map(|merged| *self = merged))
            }
        }

        impl $crate::element::ObjectSlot for Option<$name> {
            fn object_type(&self) -> &'static str {
                stringify!($name)
            }

            fn allocate(&mut self) -> &mut dyn $crate::element::Element {
                self.get_or_insert_with($name::default)
            }

            fn decode_literal(
                &mut self,
                literal: &str,
            ) -> Option<Result<(), $crate::error::DecodeError>> {
                let decoded = $crate::element::decode_merged(self.as_ref(), literal)?;
                Some(decoded.map(|merged| *self = Some(merged)))
            }
        }
    };
}

/// Declare a FHIR resource: a structure with an `id` field plus the
/// `Resource` impl.
macro_rules! fhir_resource {
    (
        $(#[$meta:meta])*
        $name:ident { $($body:tt)* }
    ) => {
        fhir_element! {
            $(#[$meta])*
            $name { $($body)* }
        }

        impl $crate::resource::Resource for $name {
            fn resource_type(&self) -> &'static str {
                stringify!($name)
            }

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn set_id(&mut self, id: String) {
                self.id = Some(id);
            }

            fn to_json(&self) -> serde_json::Result<serde_json::Value> {
                $crate::resource::encode_resource(stringify!($name), self)
            }

            fn as_element(&self) -> &dyn $crate::element::Element {
                self
            }

            fn as_element_mut(&mut self) -> &mut dyn $crate::element::Element {
                self
            }
        }
    };
}

/// Declare a FHIR code enumeration decoded from its wire code.
///
/// Fields hold codes as `Option<Enum>`; assignment goes through the
/// enum's serde decoder, so only listed codes are accepted.
macro_rules! fhir_code {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::element::Codable for Option<$name> {
            fn code_type(&self) -> &'static str {
                stringify!($name)
            }

            fn decode_literal(&mut self, literal: &str) -> Result<(), $crate::error::DecodeError> {
                *self = Some($crate::element::decode_quoted(stringify!($name), literal)?);
                Ok(())
            }
        }

        impl $crate::element::Field for Option<$name> {
            const KIND: $crate::element::FieldKind = $crate::element::FieldKind::Optional(
                $crate::element::ValueKind::Code(stringify!($name)),
            );

            fn slot(&mut self) -> $crate::element::Slot<'_> {
                $crate::element::Slot::Code(self)
            }

            fn value(&self) -> $crate::element::FieldValue<'_> {
                $crate::element::FieldValue::Code(self.map($name::as_str))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::element::ObjectSlot;
    use crate::error::DecodeError;

    fhir_element! {
        Dimension decoded_by decode_dimension {
            amount: Option<f64> => "amount",
            unit: Option<String> => "unit",
            system: Option<String> => "system",
        }
    }

    fn decode_dimension(target: &mut Dimension, literal: &str) -> Result<(), DecodeError> {
        let (amount, unit) = literal
            .split_once(' ')
            .ok_or_else(|| DecodeError::new("Dimension", literal, "expected '<amount> <unit>'"))?;
        let amount = amount
            .parse()
            .map_err(|_| DecodeError::new("Dimension", literal, "invalid amount"))?;
        target.amount = Some(amount);
        target.unit = Some(unit.to_string());
        Ok(())
    }

    #[test]
    fn decoded_literal_keeps_members_already_set() {
        let mut dimension = Some(Dimension {
            system: Some("http://unitsofmeasure.org".to_string()),
            ..Dimension::default()
        });
        dimension.decode_literal("7.2 mmol/L").unwrap().unwrap();

        let dimension = dimension.unwrap();
        assert_eq!(dimension.amount, Some(7.2));
        assert_eq!(dimension.unit.as_deref(), Some("mmol/L"));
        assert_eq!(dimension.system.as_deref(), Some("http://unitsofmeasure.org"));
    }

    #[test]
    fn rejected_literal_leaves_value_untouched() {
        let before = Dimension {
            amount: Some(1.0),
            system: Some("http://unitsofmeasure.org".to_string()),
            ..Dimension::default()
        };
        let mut dimension = before.clone();
        let error = ObjectSlot::decode_literal(&mut dimension, "high")
            .unwrap()
            .unwrap_err();
        assert_eq!(error.type_name, "Dimension");
        assert_eq!(dimension, before);
    }

    #[test]
    fn empty_slot_decodes_into_a_default_instance() {
        let mut dimension: Option<Dimension> = None;
        dimension.decode_literal("3 kg").unwrap().unwrap();
        assert_eq!(
            dimension,
            Some(Dimension {
                amount: Some(3.0),
                unit: Some("kg".to_string()),
                system: None,
            })
        );
    }
}
