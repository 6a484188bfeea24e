//! Reading one listing's detail pane into a [`JobRecord`].
use crate::error::{reading, ListingError, ListingField};
use crate::locators::SiteLocators;
use crate::pacing::{Pacer, Settle};
use jobscout_common::{normalize_description, JobRecord};
use jobscout_drivers::Browser;

/// Bring `listing` into view, open its detail pane and read every field.
///
/// Text fields are flattened to one line. Nothing is scored here; `score`
/// and `keywords` stay at their defaults.
pub async fn extract_listing<B>(
    browser: &B,
    locators: &SiteLocators,
    pacer: &Pacer,
    listing: &B::Element,
) -> Result<JobRecord, ListingError>
where
    B: Browser + ?Sized,
{
    browser
        .scroll_into_view(listing)
        .await
        .map_err(reading(ListingField::Activate))?;
    pacer.settle(Settle::BeforeListingClick).await;
    let anchor = browser
        .find_in(listing, &locators.listing_anchor)
        .await
        .map_err(reading(ListingField::Activate))?;
    browser
        .click(&anchor)
        .await
        .map_err(reading(ListingField::Activate))?;
    pacer.settle(Settle::AfterListingClick).await;

    let pane = browser
        .find(&locators.detail_pane)
        .await
        .map_err(reading(ListingField::DetailPane))?;

    let link = browser
        .current_url()
        .await
        .map_err(reading(ListingField::Link))?;

    let title = browser
        .attr(&pane, "aria-label")
        .await
        .map_err(reading(ListingField::Title))?
        .unwrap_or_default();

    // first span of the primary description is the location
    let location_el = browser
        .find_in(&pane, &locators.detail_location)
        .await
        .map_err(reading(ListingField::Location))?;
    let location = browser
        .text(&location_el)
        .await
        .map_err(reading(ListingField::Location))?;

    let company_el = browser
        .find_in(&pane, &locators.detail_company)
        .await
        .map_err(reading(ListingField::Company))?;
    let company = browser
        .text(&company_el)
        .await
        .map_err(reading(ListingField::Company))?;

    let container = browser
        .find(&locators.description_container)
        .await
        .map_err(reading(ListingField::Description))?;
    let text_box = browser
        .find_in(&container, &locators.description_text)
        .await
        .map_err(reading(ListingField::Description))?;
    let raw = browser
        .text(&text_box)
        .await
        .map_err(reading(ListingField::Description))?;

    Ok(JobRecord {
        link,
        title: normalize_description(&title),
        location: normalize_description(&location),
        company: normalize_description(&company),
        description: normalize_description(&raw),
        ..JobRecord::default()
    })
}
