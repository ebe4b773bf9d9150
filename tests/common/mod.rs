#![allow(dead_code)]

mod mocks;

pub use mocks::MockFile;

use rh_export::core::document::Document;

/// Reservation export used across the integration tests.
pub fn march_export() -> Document {
    Document::new(
        "march.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ReservationExport>
  <Property code="H01">
    <RH RID="R100" RS="Reserved" BD="2024-03-10" ED="2024-03-15" GUEST="Ada Lovelace"/>
    <RH RID="R101" RS="CANCELLED" BD="2024-03-01" ED="2024-03-03"/>
    <RH RID="r100" RS="reserved" BD="2024-03-12" ED="2024-03-13"/>
  </Property>
  <Property code="H02">
    <Floor level="2">
      <RH RID="R102" RS="Checked Out" BD="2024-02-27" ED="2024-03-10" NOTE="late checkout, &quot;VIP&quot;"/>
      <RH RID="R103" RS="No Show" BD="2024-03-20"/>
    </Floor>
  </Property>
</ReservationExport>
"#,
    )
}
