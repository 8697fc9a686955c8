#[cfg(test)]
mod tests {
    use crate::catalog::ServiceCatalog;
    use crate::error::BookingError;
    use crate::payment::PaymentForm;
    use crate::settings::BookingSettings;
    use crate::wizard::{BookingStep, BookingWizard, CONFIRMATION_SUBTITLE};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn new_wizard() -> BookingWizard {
        BookingWizard::new(today(), Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap())
    }

    fn valid_form() -> PaymentForm {
        PaymentForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/28".to_string(),
            cvv: "123".to_string(),
        }
    }

    /// A wizard sitting on the payment step with services 1 and 3, March 15th at 10:30.
    fn wizard_at_payment() -> BookingWizard {
        let catalog = ServiceCatalog::default();
        let settings = BookingSettings::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.select_service(catalog.find("3").unwrap().clone()).unwrap();
        wizard.continue_to_date().unwrap();
        wizard
            .select_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), today())
            .unwrap();
        wizard
            .select_time(NaiveTime::from_hms_opt(10, 30, 0).unwrap(), &settings)
            .unwrap();
        wizard
    }

    #[test]
    fn test_new_wizard_starts_empty_on_service_step() {
        let wizard = new_wizard();
        assert_eq!(wizard.step(), BookingStep::Service);
        assert!(wizard.selected_services().is_empty());
        assert_eq!(wizard.selected_date(), None);
        assert!(wizard.selected_time().is_none());
        assert!(!wizard.is_complete());
        assert!(!wizard.can_go_back());
        assert_eq!(wizard.current_month(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(wizard.subtitle(), "Select one or more services to continue");
    }

    #[test]
    fn test_selecting_services_accumulates_totals() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.select_service(catalog.find("3").unwrap().clone()).unwrap();

        assert_eq!(wizard.total_duration_minutes(), 90);
        assert_eq!(wizard.total_price_cents(), 13000);
        assert_eq!(wizard.service_names(), "Haircut & Style, Hair Treatment");
    }

    #[test]
    fn test_selecting_same_service_twice_is_a_no_op() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        let haircut = catalog.find("1").unwrap().clone();
        wizard.select_service(haircut.clone()).unwrap();
        wizard.select_service(haircut).unwrap();
        assert_eq!(wizard.selected_services().len(), 1);
        assert_eq!(wizard.total_price_cents(), 4500);
    }

    #[test]
    fn test_remove_service_keeps_the_others() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.select_service(catalog.find("2").unwrap().clone()).unwrap();
        wizard.remove_service("1").unwrap();
        assert_eq!(wizard.service_names(), "Hair Color");
        wizard.remove_service("missing").unwrap();
        assert_eq!(wizard.selected_services().len(), 1);
    }

    #[test]
    fn test_continue_requires_a_service() {
        let mut wizard = new_wizard();
        assert_eq!(wizard.continue_to_date(), Err(BookingError::NoServicesSelected));
        assert_eq!(wizard.step(), BookingStep::Service);
    }

    #[test]
    fn test_full_flow_reaches_payment() {
        let wizard = wizard_at_payment();
        assert_eq!(wizard.step(), BookingStep::Payment);
        assert_eq!(wizard.selected_time().unwrap().label, "10:30 AM");
        let order = wizard.order_summary().unwrap();
        assert_eq!(order.total_price_cents, 13000);
        assert_eq!(order.total_duration_minutes, 90);
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_operations_outside_their_step_conflict() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        let err = wizard.select_date(today(), today()).unwrap_err();
        assert_eq!(
            err,
            BookingError::WrongStep {
                expected: BookingStep::Date,
                actual: BookingStep::Service,
            }
        );

        let mut wizard = wizard_at_payment();
        assert!(matches!(
            wizard.select_service(catalog.find("2").unwrap().clone()),
            Err(BookingError::WrongStep { .. })
        ));
        assert!(matches!(
            wizard.show_next_month(),
            Err(BookingError::WrongStep { .. })
        ));
    }

    #[test]
    fn test_past_dates_are_rejected() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.continue_to_date().unwrap();

        let yesterday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            wizard.select_date(yesterday, today()),
            Err(BookingError::PastDate(yesterday))
        );
        assert_eq!(wizard.step(), BookingStep::Date);

        // Today itself is bookable.
        wizard.select_date(today(), today()).unwrap();
        assert_eq!(wizard.step(), BookingStep::Time);
    }

    #[test]
    fn test_selecting_a_day_in_next_month_moves_the_calendar() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.continue_to_date().unwrap();
        wizard
            .select_date(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(), today())
            .unwrap();
        assert_eq!(wizard.current_month(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_month_navigation_on_date_step() {
        let catalog = ServiceCatalog::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.continue_to_date().unwrap();

        wizard.show_next_month().unwrap();
        assert_eq!(wizard.calendar(today()).title, "April 2024");
        wizard.show_previous_month().unwrap();
        wizard.show_previous_month().unwrap();
        assert_eq!(wizard.calendar(today()).title, "February 2024");
    }

    #[test]
    fn test_unknown_time_is_rejected() {
        let catalog = ServiceCatalog::default();
        let settings = BookingSettings::default();
        let mut wizard = new_wizard();
        wizard.select_service(catalog.find("1").unwrap().clone()).unwrap();
        wizard.continue_to_date().unwrap();
        wizard
            .select_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), today())
            .unwrap();

        let odd = NaiveTime::from_hms_opt(10, 10, 0).unwrap();
        assert_eq!(
            wizard.select_time(odd, &settings),
            Err(BookingError::UnavailableTime(odd))
        );
        assert_eq!(wizard.available_slots(&settings).unwrap().len(), 16);
    }

    #[test]
    fn test_back_clears_the_step_being_left() {
        let mut wizard = wizard_at_payment();

        wizard.back().unwrap();
        assert_eq!(wizard.step(), BookingStep::Time);
        assert!(wizard.selected_time().is_none());
        assert!(wizard.selected_date().is_some());

        wizard.back().unwrap();
        assert_eq!(wizard.step(), BookingStep::Date);
        assert_eq!(wizard.selected_date(), None);
        assert_eq!(wizard.selected_services().len(), 2);

        wizard.back().unwrap();
        assert_eq!(wizard.step(), BookingStep::Service);
        assert!(wizard.selected_services().is_empty());

        // Already at the first step.
        wizard.back().unwrap();
        assert_eq!(wizard.step(), BookingStep::Service);
    }

    #[test]
    fn test_previous_and_next_keep_selections() {
        let mut wizard = wizard_at_payment();

        wizard.previous().unwrap();
        wizard.previous().unwrap();
        assert_eq!(wizard.step(), BookingStep::Date);
        assert!(wizard.selected_date().is_some());
        assert!(wizard.selected_time().is_some());

        wizard.next().unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.step(), BookingStep::Payment);
        // Nothing after payment.
        wizard.next().unwrap();
        assert_eq!(wizard.step(), BookingStep::Payment);
    }

    #[test]
    fn test_next_waits_for_the_current_selection() {
        let mut wizard = new_wizard();
        wizard.next().unwrap();
        assert_eq!(wizard.step(), BookingStep::Service);
    }

    #[test]
    fn test_payment_completes_the_booking() {
        let mut wizard = wizard_at_payment();
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 16, 0, 0).unwrap();
        let receipt = wizard.complete_payment(&valid_form(), now).unwrap().clone();

        assert!(receipt.reference.starts_with("DS-"));
        assert_eq!(receipt.card_last4, "4242");
        assert_eq!(receipt.amount_cents, 13000);
        assert!(wizard.is_complete());
        assert!(!wizard.can_go_back());
        assert_eq!(wizard.subtitle(), CONFIRMATION_SUBTITLE);
    }

    #[test]
    fn test_invalid_payment_leaves_booking_open() {
        let mut wizard = wizard_at_payment();
        let mut form = valid_form();
        form.cvv = "12".to_string();
        let err = wizard.complete_payment(&form, Utc::now()).unwrap_err();
        assert!(matches!(err, BookingError::InvalidPayment(_)));
        assert!(!wizard.is_complete());
        assert_eq!(wizard.step(), BookingStep::Payment);
    }

    #[test]
    fn test_complete_booking_only_accepts_reset() {
        let mut wizard = wizard_at_payment();
        wizard.complete_payment(&valid_form(), Utc::now()).unwrap();

        assert_eq!(wizard.back(), Err(BookingError::AlreadyComplete));
        assert_eq!(wizard.next(), Err(BookingError::AlreadyComplete));
        assert_eq!(wizard.previous(), Err(BookingError::AlreadyComplete));
        assert!(matches!(
            wizard.complete_payment(&valid_form(), Utc::now()),
            Err(BookingError::AlreadyComplete)
        ));

        wizard.reset(today());
        assert_eq!(wizard.step(), BookingStep::Service);
        assert!(!wizard.is_complete());
        assert!(wizard.selected_services().is_empty());
        assert_eq!(wizard.selected_date(), None);
        assert!(wizard.selected_time().is_none());
        assert_eq!(wizard.total_price_cents(), 0);
    }

    #[test]
    fn test_step_labels_and_subtitles() {
        let labels: Vec<_> = BookingStep::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Select Service", "Choose Date", "Pick Time", "Payment"]
        );
        assert_eq!(BookingStep::Date.subtitle(), "Choose a date for your appointment");
        assert_eq!(BookingStep::Time.subtitle(), "Select an available time slot");
        assert_eq!(BookingStep::Payment.subtitle(), "Review and complete your booking");
        assert_eq!(BookingStep::Time.to_string(), "time");
    }
}
