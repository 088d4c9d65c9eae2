/// The rule set a codec instance operates under.
///
/// BER leaves the sender free choices (length forms, non-minimal numbers,
/// fragmented strings); CER and DER each pin every abstract value to one
/// encoding, and the predicates below are how the rest of the crate asks
/// which freedoms are in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EncodingRules {
    Ber,
    Cer,
    Der,
}

impl EncodingRules {
    pub fn is_ber(self) -> bool {
        matches!(self, Self::Ber)
    }

    pub fn is_cer(self) -> bool {
        matches!(self, Self::Cer)
    }

    pub fn is_der(self) -> bool {
        matches!(self, Self::Der)
    }

    /// Whether string values may arrive fragmented across constructed
    /// sub-elements on decode. DER alone insists on the primitive form.
    pub fn allows_constructed_strings(self) -> bool {
        !self.is_der()
    }

    /// Whether the indefinite length form is accepted on decode. DER alone
    /// requires definite lengths throughout.
    pub fn allows_indefinite(self) -> bool {
        !self.is_der()
    }

    /// Whether every abstract value is pinned to a single encoding,
    /// tightening decode-side checks.
    pub fn is_canonical(self) -> bool {
        !self.is_ber()
    }

    /// The longest primitive string encoding permitted on encode; longer
    /// values are fragmented.
    pub fn max_string_length(self) -> usize {
        if self.is_cer() { 1000 } else { usize::MAX }
    }
}
